//! api-digest main entry point
//!
//! This is the command-line interface for the api-digest batch pipeline.

use api_digest::config::{Config, ConfigOverrides, LogLevel};
use api_digest::logging::setup_logging;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// api-digest: fetch a JSON collection, summarise it, save both to disk
///
/// Every option overrides the matching environment variable (API_URL,
/// API_TIMEOUT, DATA_FOLDER, OUTPUT_PREFIX, LOG_LEVEL). Unset options fall
/// back to the environment, then to built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "api-digest")]
#[command(version)]
#[command(about = "Fetch a JSON collection, summarise it, and save both", long_about = None)]
struct Cli {
    /// Settings file of KEY=value lines (default: .env in the working directory)
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Endpoint returning a JSON array
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<String>,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    data_folder: Option<String>,

    /// Output filename prefix
    #[arg(long, value_name = "PREFIX")]
    output_prefix: Option<String>,

    /// Log level (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            api_timeout: self.timeout.clone(),
            data_folder: self.data_folder.clone(),
            output_prefix: self.output_prefix.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, settings) = match Config::load(cli.env_file.as_deref(), &cli.overrides()) {
        Ok(loaded) => loaded,
        Err(e) => {
            // No level was resolved, so report at the default one
            setup_logging(LogLevel::Info);
            tracing::error!("Application failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    setup_logging(config.log_level);

    if let Some(settings) = settings {
        tracing::debug!("Loaded settings from {}", settings.path.display());
        for skipped in &settings.skipped {
            tracing::warn!(
                "Skipped malformed line in {}: {}",
                settings.path.display(),
                skipped
            );
        }
    }

    match api_digest::run(&config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Application failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
