use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use trip_climate::{ClimateConfig, ClimateError, ClimateService, logging};

/// Historical average climate for a place over your trip dates
#[derive(Debug, Parser)]
#[command(name = "trip-climate", version)]
struct Cli {
    /// City or place name
    place: String,
    /// First day of the trip (YYYY-MM-DD)
    start_date: String,
    /// Last day of the trip (YYYY-MM-DD)
    end_date: String,
    /// Print the structured summary as JSON
    #[arg(long)]
    json: bool,
    /// Path to a TOML config file
    #[arg(long, env = "TRIP_CLIMATE_CONFIG")]
    config: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ClimateError>() {
                Some(climate_err) => eprintln!("Error: {}", climate_err.user_message()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClimateConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    if let Some(path) = cli.config.as_ref() {
        tracing::debug!("Using config from: {}", path.display());
    }

    let service = ClimateService::from_config(&config)?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let summary = service
        .summarize_with_cancel(&cli.place, &cli.start_date, &cli.end_date, &cancel)
        .await?;

    if cli.json {
        let json = serde_json::to_string_pretty(&summary)
            .with_context(|| "Failed to serialize summary")?;
        println!("{json}");
    } else {
        println!("{summary}");
    }
    Ok(())
}
