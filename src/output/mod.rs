//! Output module for persisting a run's results
//!
//! This module handles:
//! - Creating the data folder on demand
//! - Writing the raw items as pretty-printed JSON
//! - Writing the summary document next to it under the same timestamp

mod json_writer;

pub use json_writer::{
    effective_data_folder, ensure_data_folder, save_data, write_json_pretty, SavedFiles,
};

/// `strftime` pattern stamped into output filenames
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
