use crate::error::WizardError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Share of the trip total collected upfront when paying in advance.
pub const ADVANCE_RATE: Decimal = dec!(0.3);

/// Share shown as due on trip completion after an advance.
pub const REMAINING_RATE: Decimal = dec!(0.7);

/// A whole amount of rupees, the smallest unit the dashboard deals in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rupees(pub u64);

impl Rupees {
    pub const ZERO: Self = Self(0);

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Applies `rate` and rounds half away from zero to a whole rupee.
    ///
    /// The product is computed in exact decimal arithmetic, so `x.5` always
    /// rounds up for the non-negative amounts handled here.
    pub fn share(&self, rate: Decimal) -> Self {
        let scaled = (Decimal::from(self.0) * rate)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Self(scaled.to_u64().unwrap_or_default())
    }
}

impl fmt::Display for Rupees {
    /// Indian grouping with a rupee sign: `₹1,00,000`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        if digits.len() <= 3 {
            return write!(f, "₹{digits}");
        }
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (left, right) = rest.split_at(rest.len() - 2);
            groups.push(right);
            rest = left;
        }
        groups.push(rest);
        groups.reverse();
        write!(f, "₹{},{}", groups.join(","), tail)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[default]
    Advance,
    Full,
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentType::Advance => f.write_str("advance"),
            PaymentType::Full => f.write_str("full"),
        }
    }
}

impl FromStr for PaymentType {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advance" => Ok(PaymentType::Advance),
            "full" => Ok(PaymentType::Full),
            other => Err(WizardError::InvalidEvent(format!(
                "unknown payment type '{other}'"
            ))),
        }
    }
}

/// The figures offered to the customer for one trip total.
///
/// `advance` and `remaining` are rounded independently, so they can add up
/// to one rupee more than `total` (a total of 5 gives 2 + 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountBreakdown {
    pub total: Rupees,
    pub advance: Rupees,
    pub remaining: Rupees,
}

impl AmountBreakdown {
    pub fn for_total(total: Rupees) -> Self {
        Self {
            total,
            advance: total.share(ADVANCE_RATE),
            remaining: total.share(REMAINING_RATE),
        }
    }

    /// The amount charged now for the chosen payment type.
    pub fn due(&self, payment_type: PaymentType) -> Rupees {
        match payment_type {
            PaymentType::Advance => self.advance,
            PaymentType::Full => self.total,
        }
    }

    /// False when independent rounding made advance + remaining differ from total.
    pub fn is_balanced(&self) -> bool {
        self.advance.0.checked_add(self.remaining.0) == Some(self.total.0)
    }
}
