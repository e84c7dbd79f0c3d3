#![allow(dead_code)]

use chrono::NaiveDate;
use fleet_pay::application::wizard::PaymentWizard;
use fleet_pay::config::WizardConfig;
use fleet_pay::domain::details::Field;
use fleet_pay::domain::trip::TripContext;
use fleet_pay::domain::wizard::WizardEvent;
use fleet_pay::infrastructure::clock::FixedClock;
use fleet_pay::infrastructure::recording_host::RecordingHost;
use fleet_pay::infrastructure::timers::ManualTimerService;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

pub fn trip(total: u64) -> TripContext {
    TripContext::new("Pune - Goa", "12 Jan - 14 Jan", 450.0, total)
}

/// A wizard on a simulated clock: timers only elapse when the test pops them.
pub fn manual_wizard() -> (PaymentWizard, ManualTimerService, RecordingHost) {
    let timers = ManualTimerService::new();
    let host = RecordingHost::new();
    let wizard = PaymentWizard::new(
        WizardConfig::default(),
        Box::new(timers.clone()),
        Box::new(FixedClock(today())),
        Box::new(host.clone()),
    );
    (wizard, timers, host)
}

pub fn valid_card_edits() -> Vec<WizardEvent> {
    vec![
        WizardEvent::edit(Field::CardNumber, "4111111111111111"),
        WizardEvent::edit(Field::Expiry, "1227"),
        WizardEvent::edit(Field::Cvv, "123"),
        WizardEvent::edit(Field::CardholderName, "Asha Rao"),
    ]
}

pub async fn run_all(wizard: &mut PaymentWizard, events: Vec<WizardEvent>) {
    for event in events {
        wizard.dispatch(event).await.unwrap();
    }
}
