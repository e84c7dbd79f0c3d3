use chrono::NaiveDate;
use clap::Parser;
use fleet_pay::application::runtime::WizardRuntime;
use fleet_pay::application::wizard::PaymentWizard;
use fleet_pay::config::WizardConfig;
use fleet_pay::domain::ports::ClockBox;
use fleet_pay::infrastructure::clock::{FixedClock, SystemClock};
use fleet_pay::infrastructure::recording_host::RecordingHost;
use fleet_pay::infrastructure::timers::TokioTimerService;
use fleet_pay::interfaces::csv::event_reader::EventReader;
use fleet_pay::interfaces::csv::report_writer::{ReportWriter, SessionReport};
use fleet_pay::interfaces::trip_file::load_trip;
use fleet_pay::telemetry;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scripted wizard events CSV file (event, field, value)
    events: PathBuf,

    /// Trip being paid for, as JSON
    #[arg(long)]
    trip: Option<PathBuf>,

    /// Simulated settlement time in milliseconds
    #[arg(long, default_value_t = 3000)]
    settlement_delay_ms: u64,

    /// Pause on the success screen in milliseconds
    #[arg(long, default_value_t = 2000)]
    confirmation_delay_ms: u64,

    /// Date used for card expiry checks (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level).into_diagnostic()?;

    let config = WizardConfig {
        settlement_delay: Duration::from_millis(cli.settlement_delay_ms),
        confirmation_delay: Duration::from_millis(cli.confirmation_delay_ms),
    };
    let clock: ClockBox = match cli.today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    };
    let trip = cli.trip.as_deref().map(load_trip).transpose().into_diagnostic()?;

    let (timers, timer_rx) = TokioTimerService::channel();
    let host = RecordingHost::new();
    let wizard = PaymentWizard::new(config, Box::new(timers), clock, Box::new(host.clone()));
    let mut runtime = WizardRuntime::new(wizard, timer_rx);

    runtime.wizard_mut().open(trip);
    let mut snapshot = runtime.wizard().session().cloned();

    // Replay the script
    let file = File::open(cli.events).into_diagnostic()?;
    let reader = EventReader::new(file);
    for event in reader.events() {
        match event {
            Ok(event) => {
                let result = runtime.dispatch(event).await;
                if let Some(session) = runtime.wizard().session() {
                    snapshot = Some(session.clone());
                }
                if let Err(e) = result {
                    eprintln!("Error applying event: {}", e);
                }
                runtime.settle().await.into_diagnostic()?;
            }
            Err(e) => {
                eprintln!("Error reading event: {}", e);
            }
        }
    }

    let report = SessionReport::new(
        host.outcome().await,
        snapshot.as_ref(),
        runtime.wizard().is_open(),
    );
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer.write_report(&report).into_diagnostic()?;

    Ok(())
}
