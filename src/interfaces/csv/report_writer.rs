use crate::domain::wizard::WizardSession;
use crate::error::Result;
use crate::infrastructure::recording_host::SessionOutcome;
use serde::Serialize;
use std::io::Write;

/// Summary of one scripted session, written as a single CSV row.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct SessionReport {
    pub outcome: &'static str,
    /// Current step, or `closed` once the session ended.
    pub step: String,
    pub method: Option<String>,
    pub payment_type: Option<String>,
    pub total: Option<u64>,
    pub amount_due: Option<u64>,
    pub remaining: Option<u64>,
    /// Fields that failed the last payment attempt, `;`-separated.
    pub errors: String,
}

impl SessionReport {
    /// Builds the report from the last session state seen.
    ///
    /// `open` tells whether the session is still running; `snapshot` may be
    /// `None` when no session was ever opened.
    pub fn new(outcome: SessionOutcome, snapshot: Option<&WizardSession>, open: bool) -> Self {
        let step = match snapshot {
            Some(session) if open => session.step().to_string(),
            _ => "closed".to_string(),
        };
        let breakdown = snapshot.and_then(WizardSession::breakdown);
        Self {
            outcome: outcome.as_str(),
            step,
            method: snapshot.map(|s| s.method().to_string()),
            payment_type: snapshot.map(|s| s.payment_type().to_string()),
            total: breakdown.map(|b| b.total.value()),
            amount_due: snapshot.and_then(WizardSession::amount_due).map(|a| a.value()),
            remaining: breakdown.map(|b| b.remaining.value()),
            errors: snapshot
                .map(|s| {
                    s.errors()
                        .fields()
                        .map(|f| f.to_string())
                        .collect::<Vec<_>>()
                        .join(";")
                })
                .unwrap_or_default(),
        }
    }
}

pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_report(&mut self, report: &SessionReport) -> Result<()> {
        self.writer.serialize(report)?;
        self.writer.flush()?;
        Ok(())
    }
}
