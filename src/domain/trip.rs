use super::amount::Rupees;
use serde::Deserialize;

/// The trip being paid for, as handed over by the confirming screen.
///
/// Read-only to the wizard. Only `total_amount` takes part in the payment
/// logic; the other fields are shown to the customer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripContext {
    pub route: String,
    pub dates: String,
    #[serde(alias = "distance")]
    pub distance_km: f64,
    pub total_amount: Rupees,
}

impl TripContext {
    pub fn new(route: impl Into<String>, dates: impl Into<String>, distance_km: f64, total: u64) -> Self {
        Self {
            route: route.into(),
            dates: dates.into(),
            distance_km,
            total_amount: Rupees(total),
        }
    }
}
