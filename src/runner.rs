//! Pipeline runner
//!
//! Executes one fetch → aggregate → persist cycle. Nothing is written unless
//! the fetch and the aggregation both succeed.

use crate::config::Config;
use crate::fetcher::{build_http_client, fetch_payload};
use crate::output::{save_data, SavedFiles};
use crate::summary::process_data;
use crate::{FetchError, Result};

/// Runs the whole pipeline once
///
/// # Arguments
///
/// * `config` - The resolved configuration
///
/// # Returns
///
/// * `Ok(SavedFiles)` - Paths of the raw and summary files written
/// * `Err(AppError)` - The first failure, already logged where it was detected
pub async fn run(config: &Config) -> Result<SavedFiles> {
    tracing::info!("Starting api-digest data processing...");
    tracing::debug!(
        "Timeout: {}s, data folder: {}, prefix: {:?}",
        config.api_timeout,
        config.data_folder.display(),
        config.output_prefix
    );

    let client = build_http_client(config.api_timeout).map_err(|source| FetchError::Request {
        url: config.api_url.clone(),
        source,
    })?;

    let payload = fetch_payload(&client, &config.api_url).await?;
    let processed = process_data(payload)?;
    let saved = save_data(&processed, &config.data_folder, &config.output_prefix)?;

    tracing::info!("Processing completed successfully!");
    Ok(saved)
}
