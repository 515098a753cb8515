// P&L dashboard entry point: load the sales file once, compute the statement for the
// chosen scenario and print the report.
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod app;
mod components;
mod config;
mod services;
mod state;

use app::App;
use config::theme::ThemePalette;
use config::AppConfig;
use services::engine_client::EngineClient;
use state::app_state::{AppState, RateKind};

// What `run` produced; a load failure has already been reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportStatus {
    Rendered,
    LoadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Profit & Loss statement, KPIs and profit waterfall from a sales transactions CSV
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// The path to the sales CSV file (defaults to the configured data file)
    data_file: Option<PathBuf>,

    /// Selling expense rate in percent of total sales
    #[arg(long, value_name = "PERCENT")]
    selling_rate: Option<f64>,

    /// Admin expense rate in percent of gross profit
    #[arg(long, value_name = "PERCENT")]
    admin_rate: Option<f64>,

    /// Tax rate in percent of profit before tax
    #[arg(long, value_name = "PERCENT")]
    tax_rate: Option<f64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable ANSI colors in the text report
    #[arg(long)]
    no_color: bool,

    /// JSON configuration file replacing the built-in defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Logs go to stderr so the report on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(ReportStatus::Rendered) => ExitCode::SUCCESS,
        Ok(ReportStatus::LoadFailed) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ReportStatus> {
    let app_config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load_default()?,
    };
    tracing::info!("Loaded configuration version {}", app_config.version);

    let mut state = AppState::from_config(&app_config);
    if let Some(path) = args.data_file {
        state.data_path = path;
    }
    let requested = [
        (RateKind::Selling, args.selling_rate),
        (RateKind::Admin, args.admin_rate),
        (RateKind::Tax, args.tax_rate),
    ];
    for (kind, percent) in requested {
        if let Some(percent) = percent {
            state.set_rate_percent(kind, percent)?;
        }
    }

    let use_color = app_config.app.color
        && !args.no_color
        && args.format == OutputFormat::Text
        && std::io::stdout().is_terminal();
    let palette = if use_color { ThemePalette::ansi() } else { ThemePalette::plain() };
    let app = App::new(&app_config, palette);

    let mut client = EngineClient::new(app_config.data.loader_settings()?)?;
    let table = match client.load_table(&state.data_path) {
        Ok(table) => table,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load transactions");
            eprint!("{}", app.render_load_error(&err));
            return Ok(ReportStatus::LoadFailed);
        }
    };

    // Served from the cache: only the calculation runs again.
    let result = client.compute(&state.data_path, state.params())?;
    tracing::debug!(cached_tables = client.cached_tables(), "Scenario computed");
    if !result.kpis.all_defined() {
        tracing::warn!("Some profitability KPIs are undefined for this scenario");
    }

    match args.format {
        OutputFormat::Text => print!("{}", app.render_text(&state, &table, &result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&app.render_json(&table, &result))?),
    }
    Ok(ReportStatus::Rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_rates_and_format() {
        let args = Args::try_parse_from([
            "pnl-dashboard",
            "sales.csv",
            "--selling-rate",
            "6",
            "--tax-rate",
            "35.5",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.data_file, Some(PathBuf::from("sales.csv")));
        assert_eq!(args.selling_rate, Some(6.0));
        assert_eq!(args.admin_rate, None);
        assert_eq!(args.tax_rate, Some(35.5));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_run_rejects_out_of_range_rate() {
        let args = Args::try_parse_from(["pnl-dashboard", "whatever.csv", "--tax-rate", "70"]).unwrap();
        let err = run(args).unwrap_err();
        assert!(err.to_string().contains("tax_rate"));
    }

    #[test]
    fn test_run_reports_missing_file_as_failure() {
        let args = Args::try_parse_from(["pnl-dashboard", "no/such/file.csv", "--no-color"]).unwrap();
        assert_eq!(run(args).unwrap(), ReportStatus::LoadFailed);
    }
}
