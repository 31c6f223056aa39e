//! Summary module for aggregating fetched items
//!
//! This module handles:
//! - Counting items and distinct owners
//! - Averaging title lengths
//! - Grouping item counts by owner identifier

mod aggregator;
mod types;

pub use aggregator::{owner_key, process_data, OWNER_KEY, TITLE_KEY, UNKNOWN_OWNER};
pub use types::{ItemsByUser, ProcessedData, SummaryDocument, SummaryStats};
