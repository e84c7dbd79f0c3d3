use super::wizard::Timer;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

/// Schedules a timer to be delivered back to the wizard after `delay`.
///
/// Implementations must not block; delivery happens later through whatever
/// channel the implementation owns.
pub trait TimerService: Send + Sync {
    fn schedule(&self, timer: Timer, delay: Duration);
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The screen hosting the wizard.
#[async_trait]
pub trait PaymentHost: Send + Sync {
    async fn on_payment_success(&self);
    async fn on_close(&self);
}

pub type TimerServiceBox = Box<dyn TimerService>;
pub type ClockBox = Box<dyn Clock>;
pub type PaymentHostBox = Box<dyn PaymentHost>;
