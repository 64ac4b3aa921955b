//! tickwap
//!
//! Computes 30/60/120 minute (or configured) TWAP series for one pool from
//! its on-chain tick events and writes them as a line chart.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use tickwap_reporter::config::LoggingConfig;
use tickwap_reporter::{create_example_config, generate_report, init_logging, ReporterConfig};

#[derive(Parser, Debug)]
#[command(name = "tickwap")]
#[command(about = "Time-weighted average price charts from on-chain tick events")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "tickwap.toml")]
    config: PathBuf,

    /// Override the pool id
    #[arg(long)]
    pool: Option<String>,

    /// Override the chart output path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override log level
    #[arg(long)]
    log_level: Option<String>,

    /// Dry run mode (validate config and exit)
    #[arg(long)]
    dry_run: bool,

    /// Write an example configuration to --config and exit
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.init {
        let mut logging = LoggingConfig::default();
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }
        init_logging(&logging)?;

        if cli.config.exists() {
            warn!("Overwriting existing config file {}", cli.config.display());
        }
        create_example_config(&cli.config)
            .with_context(|| format!("writing example config to {}", cli.config.display()))?;
        info!("Wrote example configuration to {}", cli.config.display());
        return Ok(());
    }

    // Load configuration
    let mut config = ReporterConfig::load(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;

    // Apply overrides
    if let Some(pool) = cli.pool {
        config.pool.id = pool;
        config.pool.name = None;
    }
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    if let Some(log_level) = cli.log_level {
        config.logging.level = log_level;
    }
    config.validate().context("validating config overrides")?;

    // Initialize logging
    init_logging(&config.logging)?;

    info!("Starting tickwap");
    info!("Pool: {}", config.pool.id);
    match &config.source.fixture {
        Some(fixture) => info!("Source: fixture {}", fixture.display()),
        None => info!("Source: {}", config.source.endpoint),
    }
    info!(
        "Windows: {}",
        config
            .windows
            .iter()
            .map(|w| w.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if cli.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        return Ok(());
    }

    let report = generate_report(&config)
        .await
        .with_context(|| format!("generating TWAP report for pool {}", config.pool.id))?;

    info!(
        "Done: {} series written to {}",
        report.series.len(),
        config.output.path.display()
    );
    Ok(())
}
