use crate::domain::details::Field;
use crate::domain::wizard::WizardEvent;
use crate::error::{Result, WizardError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SelectMethod,
    Continue,
    Back,
    PaymentType,
    Edit,
    Pay,
    Close,
}

/// One row of a scripted session: `event, field, value`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct EventRecord {
    pub event: EventKind,
    pub field: Option<Field>,
    pub value: Option<String>,
}

impl TryFrom<EventRecord> for WizardEvent {
    type Error = WizardError;

    fn try_from(record: EventRecord) -> Result<Self> {
        let value = || {
            record
                .value
                .clone()
                .ok_or_else(|| WizardError::InvalidEvent(format!("{:?} needs a value", record.event)))
        };

        let event = match record.event {
            EventKind::SelectMethod => WizardEvent::SelectMethod(value()?.parse()?),
            EventKind::PaymentType => WizardEvent::ChangePaymentType(value()?.parse()?),
            EventKind::Edit => {
                let field = record
                    .field
                    .ok_or_else(|| WizardError::InvalidEvent("edit needs a field".to_string()))?;
                WizardEvent::edit(field, record.value.clone().unwrap_or_default())
            }
            EventKind::Continue => WizardEvent::Continue,
            EventKind::Back => WizardEvent::Back,
            EventKind::Pay => WizardEvent::Pay,
            EventKind::Close => WizardEvent::Close,
        };
        Ok(event)
    }
}

/// Reads wizard events from a CSV source.
///
/// Rows are trimmed and may omit trailing columns.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily parses each row into an event; a bad row yields an error and
    /// reading continues with the next one.
    pub fn events(self) -> impl Iterator<Item = Result<WizardEvent>> {
        self.reader
            .into_deserialize::<EventRecord>()
            .map(|result| result.map_err(WizardError::from).and_then(WizardEvent::try_from))
    }
}
