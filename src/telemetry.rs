use crate::error::{Result, WizardError};
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber, writing to stderr so stdout stays a clean report.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| WizardError::Telemetry(e.to_string()))
}
