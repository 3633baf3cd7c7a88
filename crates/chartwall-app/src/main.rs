//! Chartwall entry point.
//!
//! Scrapes ranked NSE volume gainers and projects them onto a paged
//! browser chart wall driven over WebDriver.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// NSE volume gainers on a paged browser chart wall
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via CHARTWALL_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    chartwall_telemetry::init_logging()?;

    info!("Starting chartwall v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > CHARTWALL_CONFIG env var > default location
    let config = match args.config.or_else(|| std::env::var("CHARTWALL_CONFIG").ok()) {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            chartwall_app::AppConfig::from_file(&path)?
        }
        None => chartwall_app::AppConfig::load()?,
    };
    info!(
        webdriver_url = %config.webdriver_url,
        wall_url = %config.wall_url,
        "Configuration loaded"
    );

    let app = chartwall_app::Application::new(config)?;
    app.run().await?;

    Ok(())
}
