use crate::config::types::{Config, ConfigOverrides, LogLevel};
use crate::config::{
    DEFAULT_API_TIMEOUT, DEFAULT_API_URL, DEFAULT_DATA_FOLDER, DEFAULT_LOG_LEVEL,
    DEFAULT_OUTPUT_PREFIX, ENV_API_TIMEOUT, ENV_API_URL, ENV_DATA_FOLDER, ENV_LOG_LEVEL,
    ENV_OUTPUT_PREFIX,
};
use crate::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory when no path is given
pub const DEFAULT_SETTINGS_FILE: &str = ".env";

/// Outcome of loading a settings file
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsFile {
    /// The file that was read
    pub path: PathBuf,

    /// Parse errors for lines that were skipped
    pub skipped: Vec<String>,
}

/// Loads `KEY=value` pairs from a settings file into the process environment
///
/// Variables that are already set are left untouched. Lines that do not
/// parse are skipped and reported; the remaining lines still load.
///
/// # Arguments
///
/// * `path` - Explicit settings file, or `None` for `.env` in the working directory
///
/// # Returns
///
/// * `Ok(Some(SettingsFile))` - The file existed and was loaded
/// * `Ok(None)` - No settings file was found
/// * `Err(ConfigError)` - The file exists but could not be opened
pub fn load_settings_file(path: Option<&Path>) -> ConfigResult<Option<SettingsFile>> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));

    if !path.is_file() {
        return Ok(None);
    }

    let entries = dotenvy::from_path_iter(path).map_err(|source| ConfigError::SettingsFile {
        path: path.display().to_string(),
        source,
    })?;

    let mut skipped = Vec::new();
    for entry in entries {
        match entry {
            Ok((key, value)) => {
                if std::env::var_os(&key).is_none() {
                    std::env::set_var(key, value);
                }
            }
            Err(e) => skipped.push(e.to_string()),
        }
    }

    Ok(Some(SettingsFile {
        path: path.to_path_buf(),
        skipped,
    }))
}

/// Picks the override if non-empty, else the environment value, else the default
fn resolve_field<F>(override_value: Option<&str>, lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match override_value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => lookup(key).unwrap_or_else(|| default.to_string()),
    }
}

impl Config {
    /// Loads the settings file, then resolves against the process environment
    ///
    /// Also returns what was read from the settings file, if one was found,
    /// so skipped lines can be reported once logging is up.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use api_digest::config::{Config, ConfigOverrides};
    /// use std::path::Path;
    ///
    /// let settings = Some(Path::new("prod.env"));
    /// let (config, _) = Config::load(settings, &ConfigOverrides::default()).unwrap();
    /// println!("Timeout: {}s", config.api_timeout);
    /// ```
    pub fn load(
        settings_file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> ConfigResult<(Self, Option<SettingsFile>)> {
        let settings = load_settings_file(settings_file)?;
        let config = Self::from_env(overrides)?;
        Ok((config, settings))
    }

    /// Resolves every field against the process environment
    pub fn from_env(overrides: &ConfigOverrides) -> ConfigResult<Self> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves every field against an arbitrary environment lookup
    ///
    /// # Arguments
    ///
    /// * `overrides` - Explicit values that win over the environment
    /// * `lookup` - Returns the environment value for a variable name, if set
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Every field resolved
    /// * `Err(ConfigError)` - The timeout is not an integer or the log level is unknown
    pub fn resolve<F>(overrides: &ConfigOverrides, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = resolve_field(
            overrides.api_url.as_deref(),
            &lookup,
            ENV_API_URL,
            DEFAULT_API_URL,
        );

        let timeout_raw = resolve_field(
            overrides.api_timeout.as_deref(),
            &lookup,
            ENV_API_TIMEOUT,
            DEFAULT_API_TIMEOUT,
        );
        let api_timeout = timeout_raw
            .trim()
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidTimeout {
                value: timeout_raw.clone(),
                source,
            })?;

        let data_folder = PathBuf::from(resolve_field(
            overrides.data_folder.as_deref(),
            &lookup,
            ENV_DATA_FOLDER,
            DEFAULT_DATA_FOLDER,
        ));

        let output_prefix = resolve_field(
            overrides.output_prefix.as_deref(),
            &lookup,
            ENV_OUTPUT_PREFIX,
            DEFAULT_OUTPUT_PREFIX,
        );

        let log_level: LogLevel = resolve_field(
            overrides.log_level.as_deref(),
            &lookup,
            ENV_LOG_LEVEL,
            DEFAULT_LOG_LEVEL,
        )
        .parse()?;

        Ok(Config {
            api_url,
            api_timeout,
            data_folder,
            output_prefix,
            log_level,
        })
    }
}
