//! Childcare billing command line.
//!
//! Resolves the billing period, reads the calendar events for the period and
//! since the contract start, and prints the invoice.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use childcare_billing::calculation::{
    PatternClassifier, compute_invoice, fold_events, resolve_period, since_contract_start,
};
use childcare_billing::config::ConfigLoader;
use childcare_billing::error::{EngineError, EngineResult};
use childcare_billing::models::ReportingWindow;
use childcare_billing::report::InvoiceReport;
use childcare_billing::source::{CalendarExportSource, EventSource};

/// Compute a childminder's invoice from calendar attendance events
#[derive(Parser, Debug)]
#[command(name = "childcare-billing")]
#[command(version, about, long_about = None)]
struct Args {
    /// Start of the period (YYYY-MM-DD)
    #[arg(long, default_value = "2015-09-01")]
    start: String,

    /// End of the period (YYYY-MM-DD)
    #[arg(long, default_value = "2016-08-31")]
    end: String,

    /// Month to bill (YYYY-MM); overrides --start and --end
    #[arg(short, long)]
    month: Option<String>,

    /// Directory holding contract.yaml, tariffs.yaml and calendar.yaml
    #[arg(short, long, default_value = "config")]
    config: PathBuf,

    /// Calendar export file to read events from
    #[arg(short, long, default_value = "events.json")]
    events: PathBuf,

    /// Calendar to read; defaults to calendar_id from calendar.yaml
    #[arg(long)]
    calendar_id: Option<String>,

    /// Print the invoice as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> EngineResult<String> {
    // Everything that can be rejected up front is checked before the first fetch.
    let period = resolve_period(&args.start, &args.end, args.month.as_deref())?;
    let loader = ConfigLoader::load(&args.config)?;
    let classifier = PatternClassifier::from_config(&loader.calendar().patterns)?;
    let cumulative = since_contract_start(loader.contract().start_date, &period)?;

    let calendar_id = args
        .calendar_id
        .as_deref()
        .unwrap_or(&loader.calendar().calendar_id);
    let source = CalendarExportSource::new(&args.events);

    let fetch = |window: &ReportingWindow| {
        source.list_events(calendar_id, window.time_min(), window.time_max())
    };

    let current = fold_events(&fetch(&period)?, &classifier, &period);
    let since_start = fold_events(&fetch(&cumulative)?, &classifier, &cumulative);

    let invoice = compute_invoice(&current, &since_start, loader.config());

    if args.json {
        serde_json::to_string_pretty(&invoice).map_err(|e| EngineError::Render {
            message: e.to_string(),
        })
    } else {
        Ok(InvoiceReport(&invoice).to_string())
    }
}
