//! HTTP fetcher implementation
//!
//! This module handles the one request a run makes, including:
//! - Building an HTTP client with a user agent and overall timeout
//! - A single GET request (no retries, no redirects beyond reqwest's default)
//! - Error classification
//! - JSON decoding of the response body

use crate::{FetchError, FetchResult};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with the given overall request timeout
///
/// # Arguments
///
/// * `timeout_secs` - Maximum time for the whole request, in seconds
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use api_digest::fetcher::build_http_client;
///
/// let client = build_http_client(30).unwrap();
/// ```
pub fn build_http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Maps a reqwest failure onto the fetch error taxonomy
fn classify_request_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            source: error,
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Fetches the URL once and parses the body as JSON
///
/// # Request Flow
///
/// 1. Parse the URL
/// 2. Send one GET request
/// 3. Reject any non-2xx status
/// 4. Decode the body as JSON
///
/// | Condition | Result |
/// |-----------|--------|
/// | Unparseable URL | `InvalidUrl` |
/// | Timeout | `Timeout` |
/// | Connection refused / DNS / TLS | `Connect` |
/// | HTTP status outside 2xx | `Status` |
/// | Body is not JSON | `Parse` |
///
/// Every failure is logged once here before being returned.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The endpoint to fetch
///
/// # Returns
///
/// The parsed JSON value. Its shape is not checked.
pub async fn fetch_payload(client: &Client, url: &str) -> FetchResult<Value> {
    tracing::info!("Fetching data from: {}", url);

    let result = send_and_decode(client, url).await;

    match &result {
        Ok(payload) => match payload.as_array() {
            Some(items) => tracing::info!("Successfully fetched {} items", items.len()),
            None => tracing::debug!("Fetched payload from {} is not an array", url),
        },
        Err(e) if e.is_parse() => tracing::error!("Failed to parse JSON response: {}", e),
        Err(e) => tracing::error!("Failed to fetch data from API: {}", e),
    }

    result
}

async fn send_and_decode(client: &Client, url: &str) -> FetchResult<Value> {
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| classify_request_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| classify_request_error(url, e))?;

    tracing::debug!("Received {} bytes from {}", body.len(), url);

    serde_json::from_str(&body).map_err(|source| FetchError::Parse {
        url: url.to_string(),
        source,
    })
}
