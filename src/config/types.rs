use crate::ConfigError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Resolved configuration for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Endpoint returning the JSON array to process
    pub api_url: String,

    /// Overall request timeout in seconds
    pub api_timeout: u64,

    /// Directory the output files are written to
    pub data_folder: PathBuf,

    /// Prefix prepended to both output filenames
    pub output_prefix: String,

    /// Log verbosity
    pub log_level: LogLevel,
}

/// Caller-supplied values that take precedence over the environment
///
/// An override that is `None` or an empty string falls through to the
/// environment variable, then to the default.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub api_timeout: Option<String>,
    pub data_folder: Option<String>,
    pub output_prefix: Option<String>,
    pub log_level: Option<String>,
}

/// Log verbosity levels accepted in `LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Returns the canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// Returns the equivalent `tracing` filter directive
    ///
    /// `tracing` has no level above error, so CRITICAL shares it.
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
