use crate::domain::details::{Field, PaymentMethod};
use crate::domain::validation::ValidationErrors;
use crate::domain::wizard::WizardStep;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Please fix the errors before proceeding")]
    Validation(ValidationErrors),
    #[error("'{event}' is not accepted while in {step}")]
    InvalidTransition { step: WizardStep, event: String },
    #[error("The wizard cannot be closed while in {0}")]
    CloseLocked(WizardStep),
    #[error("Field {field} is not editable while paying by {method}")]
    InactiveField { field: Field, method: PaymentMethod },
    #[error("The trip cannot change while in {0}")]
    TripLocked(WizardStep),
    #[error("The wizard is not open")]
    NotOpen,
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("Timer channel closed before the session finished")]
    ChannelClosed,
    #[error("Failed to initialize logging: {0}")]
    Telemetry(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WizardError>;
