//! Configuration module for api-digest
//!
//! Every setting resolves independently: an explicit override wins, then the
//! matching environment variable, then a built-in default. An optional
//! `KEY=value` settings file can seed the environment before resolution.
//!
//! # Example
//!
//! ```no_run
//! use api_digest::config::{Config, ConfigOverrides};
//!
//! let (config, _) = Config::load(None, &ConfigOverrides::default()).unwrap();
//! println!("Fetching from: {}", config.api_url);
//! ```

mod resolver;
mod types;

// Re-export types
pub use types::{Config, ConfigOverrides, LogLevel};

// Re-export resolver functions
pub use resolver::{load_settings_file, SettingsFile, DEFAULT_SETTINGS_FILE};

/// Environment variable holding the endpoint URL
pub const ENV_API_URL: &str = "API_URL";
/// Environment variable holding the request timeout in seconds
pub const ENV_API_TIMEOUT: &str = "API_TIMEOUT";
/// Environment variable holding the output directory
pub const ENV_DATA_FOLDER: &str = "DATA_FOLDER";
/// Environment variable holding the output filename prefix
pub const ENV_OUTPUT_PREFIX: &str = "OUTPUT_PREFIX";
/// Environment variable holding the log level
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_API_TIMEOUT: &str = "30";
pub const DEFAULT_DATA_FOLDER: &str = "data";
pub const DEFAULT_OUTPUT_PREFIX: &str = "processed_";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";
