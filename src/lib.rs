//! api-digest: fetch a JSON collection, summarise it, save both to disk
//!
//! This crate implements a single-run batch pipeline: resolve configuration,
//! GET a JSON array from an HTTP endpoint, compute aggregate statistics over
//! it, and persist the raw payload and the summary as timestamped JSON files.

pub mod config;
pub mod fetcher;
pub mod logging;
pub mod output;
pub mod runner;
pub mod summary;

use thiserror::Error;

/// Main error type for api-digest operations
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Aggregation error: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API_TIMEOUT value '{value}': {source}")]
    InvalidTimeout {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("Invalid LOG_LEVEL value '{0}' (expected DEBUG, INFO, WARNING, ERROR or CRITICAL)")]
    InvalidLogLevel(String),

    #[error("Failed to load settings file {path}: {source}")]
    SettingsFile {
        path: String,
        source: dotenvy::Error,
    },
}

/// Errors raised while fetching the payload
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("HTTP error for {url}: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to parse JSON response from {url}: {source}")]
    Parse {
        url: String,
        source: serde_json::Error,
    },
}

impl FetchError {
    /// True for connection, timeout, status and URL failures
    pub fn is_network(&self) -> bool {
        !self.is_parse()
    }

    /// True when the response arrived but its body was not valid JSON
    pub fn is_parse(&self) -> bool {
        matches!(self, FetchError::Parse { .. })
    }
}

/// Malformed payload shapes found while aggregating
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Payload is not a JSON array (found {0})")]
    NotAnArray(&'static str),

    #[error("Item {index} is not a JSON object")]
    ItemNotObject { index: usize },

    #[error("Item {index} has an array or object as its userId")]
    UnhashableOwner { index: usize },

    #[error("Item {index} has a non-string title")]
    TitleNotString { index: usize },
}

/// Errors that can occur while writing output files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create data folder {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("Data folder path {0} exists but is not a directory")]
    NotADirectory(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },
}

/// Result type alias for api-digest operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

// Re-export commonly used types
pub use config::{Config, ConfigOverrides, LogLevel};
pub use output::SavedFiles;
pub use runner::run;
pub use summary::{process_data, ProcessedData};
