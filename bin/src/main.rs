//! rsscreen CLI binary.
//!
//! Provides a command-line interface for the rsscreen relative-strength
//! screener.

mod cmd;
mod data;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rsscreen")]
#[command(about = "Relative-strength ranking and screening for ETF universes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a universe and print the screened report
    Screen {
        /// Price file: {"SPY": [{"date": "YYYY-MM-DD", "close": 1.0}, ...], ...}
        #[arg(short, long)]
        prices: PathBuf,

        /// Configuration file (defaults to $RSSCREEN_CONFIG, then built-in defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show lookback windows, trend flags and filterable fields
    Windows {
        /// Configuration file (defaults to $RSSCREEN_CONFIG, then built-in defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List indicators usable in trend flags
    Indicators {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Fixed-width table
    Text,
    /// Pretty-printed JSON
    Json,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            prices,
            config,
            format,
        } => {
            cmd::screen::run_screen(&prices, config, format).await?;
        }
        Commands::Windows { config } => {
            cmd::windows::list_windows(config).await?;
        }
        Commands::Indicators { verbose } => {
            cmd::indicators::list_indicators(verbose)?;
        }
    }

    Ok(())
}
