//! Fetcher module for retrieving the JSON payload
//!
//! This module performs the single HTTP GET of a run:
//! - Building the HTTP client with the configured timeout
//! - Classifying transport, status and decode failures
//! - Parsing the body as JSON without any schema check

mod http;

pub use http::{build_http_client, fetch_payload};
