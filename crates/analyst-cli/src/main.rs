//! Command-line interface for analyst-rs
//!
//! Generates a markdown investment report for a ticker symbol and prints it
//! to stdout or writes it to a file.

use analyst_report::config::{DEFAULT_SECRETS_FILE, resolve_api_key};
use analyst_report::{ReportConfig, ReportEngine};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "analyst")]
#[command(about = "Generate a markdown investment report for a stock ticker", long_about = None)]
struct Args {
    /// Ticker symbol to analyze (e.g. AAPL)
    ticker: String,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Historical price range used for the analysis
    #[arg(long, default_value = "1y")]
    range: String,

    /// Path to a file containing the DeepSeek API key
    #[arg(long, default_value = DEFAULT_SECRETS_FILE)]
    secrets_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    analyst_utils::init_tracing();

    let args = Args::parse();

    let api_key = resolve_api_key(&args.secrets_file)?;
    let config = ReportConfig::new(api_key).with_history_range(&args.range);

    let engine = ReportEngine::new(config)?;
    info!(ticker = %args.ticker, variant = %engine.variant(), "starting report generation");

    let report = engine.generate(&args.ticker).await?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &report)?;
            println!("Report written to {}", path.display());
        }
        None => println!("{report}"),
    }

    Ok(())
}
