//! # sales-forecast
//!
//! Command-line front-end: paste (or pipe) a column of monthly sales, get a
//! forecast table, optional plot data and a spreadsheet.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sales_forecast::data::parse_start_date;
use sales_forecast::export::{self, ExportTable};
use sales_forecast::plot::{self, ComponentsPlot, ForecastPlot};
use sales_forecast::{AppConfig, DataLoader, ForecastError, ForecastSession, ForecastTable, OutlierSet};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sales-forecast", version)]
#[command(about = "Monthly sales forecasting with outlier-month exclusion", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the series, fit the model and print the forecast table
    Forecast(ForecastArgs),

    /// Write the default configuration to a file
    InitConfig {
        /// Destination of the TOML file
        path: PathBuf,
    },
}

#[derive(Args)]
struct ForecastArgs {
    /// File holding the pasted sales values, or - for stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Month of the first value (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    start: Option<String>,

    /// Number of past months pasted
    #[arg(long)]
    past: Option<usize>,

    /// Number of future months to forecast
    #[arg(long)]
    future: Option<usize>,

    /// Month to exclude from fitting, 1 = January (repeatable)
    #[arg(long = "outlier", value_name = "MONTH")]
    outliers: Vec<u32>,

    /// Export history + forecast to the configured spreadsheet
    #[arg(long)]
    export: bool,

    /// Export to this file instead (.xlsx or .csv)
    #[arg(long, value_name = "PATH")]
    export_path: Option<PathBuf>,

    /// Write forecast chart data (JSON)
    #[arg(long, value_name = "PATH")]
    plot: Option<PathBuf>,

    /// Write components chart data (JSON)
    #[arg(long, value_name = "PATH")]
    components: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_forecast=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            match err.downcast_ref::<ForecastError>() {
                Some(e) if e.is_validation() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Forecast(args) => forecast(config, args),
        Commands::InitConfig { path } => {
            AppConfig::default()
                .save(&path)
                .with_context(|| format!("Failed to write config file: {}", path.display()))?;
            println!("Default configuration written to {}", path.display());
            Ok(())
        }
    }
}

fn forecast(config: AppConfig, args: ForecastArgs) -> Result<()> {
    let start = match args.start.as_deref() {
        Some(text) => parse_start_date(text)?,
        None => config.input.start_date,
    };
    let past = args.past.unwrap_or(config.input.past_periods);
    let future = args.future.unwrap_or(config.input.future_periods);
    let outliers = if args.outliers.is_empty() {
        config.input.outlier_months.clone()
    } else {
        OutlierSet::from_months(args.outliers.iter().copied())?
    };

    let mut session = ForecastSession::new(config.model.build()?);

    let text = DataLoader::read_text(&args.input)
        .with_context(|| format!("Failed to read sales values from '{}'", args.input))?;
    session.paste_values(start, past, &text)?;
    session.run_forecast(&outliers, future)?;

    let series = session.series()?;
    let run = session.last_run()?;

    println!("{}", ForecastTable::from_records(run.records()));

    if let Some(path) = args.plot.or(config.output.plot_path) {
        plot::write_json(&ForecastPlot::new(series, run), &path)
            .with_context(|| format!("Failed to write plot data: {}", path.display()))?;
    }

    if let Some(path) = args.components.or(config.output.components_path) {
        plot::write_json(&ComponentsPlot::new(run), &path)
            .with_context(|| format!("Failed to write components data: {}", path.display()))?;
    }

    let export_path = match args.export_path {
        Some(path) => Some(path),
        None if args.export => Some(config.output.export_path),
        None => None,
    };
    if let Some(path) = export_path {
        export::export(&ExportTable::new(series, run), &path)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        println!("Forecast results successfully exported to {}", path.display());
    }

    Ok(())
}
