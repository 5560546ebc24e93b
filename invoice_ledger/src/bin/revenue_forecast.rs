use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use forecast_engine::{ForecastConfig, SeasonalMode};
use invoice_ledger::{export_invoices, import_invoices, mark_overdue, ImportReport, Ledger};
use tracing::warn;

#[derive(Parser)]
#[command(name = "revenue_forecast")]
#[command(about = "Forecast monthly revenue from an invoice CSV.")]
struct CommandLine {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast monthly revenue and print the result as JSON
    #[command(alias = "f")]
    Forecast {
        csv: PathBuf,
        /// Number of months to project
        #[arg(long)]
        horizon: Option<i32>,
        /// Seasonal mode: average or holt-winters
        #[arg(long)]
        mode: Option<SeasonalMode>,
        /// Seasonal cycle length in months
        #[arg(long)]
        period: Option<i32>,
        /// JSON file with forecast settings, overridden by the flags above
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Check an invoice CSV and print the import report
    #[command(alias = "i")]
    Import {
        csv: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark unpaid invoices that are past due as overdue and print the count
    #[command(alias = "o")]
    Overdue {
        csv: PathBuf,
        /// Reference date, YYYY-MM-DD; defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Write the updated ledger here, with the status column filled in
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Rewrite an invoice CSV in the canonical column layout
    #[command(alias = "e")]
    Export {
        csv: PathBuf,
        #[arg(long, short)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse();
    init_logging()?;

    match commands.command {
        Commands::Forecast {
            csv,
            horizon,
            mode,
            period,
            config,
        } => {
            let mut settings = match config {
                Some(path) => {
                    let json = fs::read_to_string(&path)
                        .with_context(|| format!("reading config {}", path.display()))?;
                    ForecastConfig::from_json(&json)?
                }
                None => ForecastConfig::default(),
            };
            if let Some(horizon) = horizon {
                settings.horizon_months = horizon;
            }
            if let Some(mode) = mode {
                settings.seasonal_mode = mode;
            }
            if let Some(period) = period {
                settings.period_length = period;
            }

            let (ledger, _) = load_ledger(&csv)?;
            let result = ledger.forecast(&settings)?;
            if result.method != settings.seasonal_mode {
                warn!(
                    requested = %settings.seasonal_mode,
                    used = %result.method,
                    "forecast mode changed"
                );
            }
            println!("{}", result.to_json()?);
        }
        Commands::Import { csv, json } => {
            let (_, report) = load_ledger(&csv)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Created: {}, Skipped: {}", report.created, report.skipped);
                for error in &report.errors {
                    println!("{}", error);
                }
            }
        }
        Commands::Overdue { csv, today, output } => {
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let (mut ledger, _) = load_ledger(&csv)?;
            let updated = mark_overdue(ledger.invoices_mut(), today);
            println!("Marked {} invoices as overdue", updated);
            if let Some(output) = output {
                write_ledger(&ledger, &output)?;
            }
        }
        Commands::Export { csv, output } => {
            let (ledger, _) = load_ledger(&csv)?;
            write_ledger(&ledger, &output)?;
        }
    }

    Ok(())
}

fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::from_default_env()
        .add_directive("revenue_forecast=info".parse()?)
        .add_directive("invoice_ledger=info".parse()?)
        .add_directive("forecast_engine=warn".parse()?);

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_ledger(path: &Path) -> anyhow::Result<(Ledger, ImportReport)> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut ledger = Ledger::new();
    let report = import_invoices(file, &mut ledger)?;

    if !report.is_clean() {
        warn!(
            rejected = report.errors.len(),
            path = %path.display(),
            "some invoice rows were rejected"
        );
    }

    Ok((ledger, report))
}

fn write_ledger(ledger: &Ledger, output: &Path) -> anyhow::Result<()> {
    let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    export_invoices(file, ledger.invoices())?;
    println!("Exported {} invoices to {}", ledger.len(), output.display());
    Ok(())
}
