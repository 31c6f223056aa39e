//! JSON file output
//!
//! This module writes the raw items and the summary document as
//! pretty-printed JSON files stamped with the local time.

use crate::output::FILE_TIMESTAMP_FORMAT;
use crate::summary::ProcessedData;
use crate::{OutputError, OutputResult};
use chrono::Local;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Paths of the files written by one run
#[derive(Debug, Clone, PartialEq)]
pub struct SavedFiles {
    pub raw_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Resolves the folder files are written into
///
/// An empty path means the working directory.
pub fn effective_data_folder(data_folder: &Path) -> &Path {
    if data_folder.as_os_str().is_empty() {
        Path::new(".")
    } else {
        data_folder
    }
}

/// Ensures the data folder exists
///
/// Only the folder itself is created; a missing parent is an error.
/// An empty path is the working directory and always exists.
///
/// # Arguments
///
/// * `data_folder` - The directory output files go into
///
/// # Returns
///
/// * `Ok(())` - The folder exists (it may have just been created)
/// * `Err(OutputError)` - It could not be created, or a non-directory is in the way
pub fn ensure_data_folder(data_folder: &Path) -> OutputResult<()> {
    let data_folder = effective_data_folder(data_folder);

    if data_folder.is_dir() {
        return Ok(());
    }

    if data_folder.exists() {
        let path = data_folder.display().to_string();
        tracing::error!("Data folder path is not a directory: {}", path);
        return Err(OutputError::NotADirectory(path));
    }

    fs::create_dir(data_folder).map_err(|source| {
        tracing::error!(
            "Failed to create data folder {}: {}",
            data_folder.display(),
            source
        );
        OutputError::CreateDir {
            path: data_folder.display().to_string(),
            source,
        }
    })?;

    tracing::debug!("Created data folder: {}", data_folder.display());
    Ok(())
}

/// Writes a value as pretty-printed JSON
///
/// Output uses two-space indentation and keeps non-ASCII characters
/// unescaped. The file is flushed before returning.
///
/// # Arguments
///
/// * `value` - Anything serializable
/// * `path` - Destination file, created or truncated
pub fn write_json_pretty<T: Serialize + ?Sized>(value: &T, path: &Path) -> OutputResult<()> {
    let write_err = |source: std::io::Error| {
        tracing::error!("Failed to write {}: {}", path.display(), source);
        OutputError::Write {
            path: path.display().to_string(),
            source,
        }
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| {
        tracing::error!("Failed to serialize {}: {}", path.display(), source);
        OutputError::Serialize {
            path: path.display().to_string(),
            source,
        }
    })?;

    writer.flush().map_err(write_err)?;
    Ok(())
}

/// Saves the raw items and the summary document
///
/// Both filenames share one timestamp captured when this function starts:
/// `<prefix>raw_<YYYYMMDD_HHMMSS>.json` and
/// `<prefix>summary_<YYYYMMDD_HHMMSS>.json`.
/// Nothing is cleaned up if the second write fails.
///
/// # Arguments
///
/// * `data` - The processed data
/// * `data_folder` - Output directory, created if missing
/// * `prefix` - Filename prefix
///
/// # Returns
///
/// * `Ok(SavedFiles)` - Both files were fully written
/// * `Err(OutputError)` - Directory creation or a write failed
pub fn save_data(
    data: &ProcessedData,
    data_folder: &Path,
    prefix: &str,
) -> OutputResult<SavedFiles> {
    let timestamp = Local::now().format(FILE_TIMESTAMP_FORMAT).to_string();
    let data_folder = effective_data_folder(data_folder);

    ensure_data_folder(data_folder)?;

    let raw_path = data_folder.join(format!("{}raw_{}.json", prefix, timestamp));
    write_json_pretty(&data.items, &raw_path)?;
    tracing::info!("Raw data saved to: {}", raw_path.display());

    let summary_path = data_folder.join(format!("{}summary_{}.json", prefix, timestamp));
    write_json_pretty(&data.summary_document(), &summary_path)?;
    tracing::info!("Summary saved to: {}", summary_path.display());

    Ok(SavedFiles {
        raw_path,
        summary_path,
    })
}
