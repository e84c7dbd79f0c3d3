use crate::domain::wizard::TimerKind;
use std::time::Duration;

pub const DEFAULT_SETTLEMENT_DELAY: Duration = Duration::from_secs(3);
pub const DEFAULT_CONFIRMATION_DELAY: Duration = Duration::from_secs(2);

/// Timing of the simulated payment.
///
/// The delays only pace the progress screens; any value works, including zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardConfig {
    pub settlement_delay: Duration,
    pub confirmation_delay: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            settlement_delay: DEFAULT_SETTLEMENT_DELAY,
            confirmation_delay: DEFAULT_CONFIRMATION_DELAY,
        }
    }
}

impl WizardConfig {
    pub fn immediate() -> Self {
        Self {
            settlement_delay: Duration::ZERO,
            confirmation_delay: Duration::ZERO,
        }
    }

    pub fn delay_for(&self, kind: TimerKind) -> Duration {
        match kind {
            TimerKind::Settlement => self.settlement_delay,
            TimerKind::Confirmation => self.confirmation_delay,
        }
    }
}
