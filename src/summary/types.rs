//! Summary record types
//!
//! This module defines the aggregate built from one fetch and the borrowed
//! view of it that is written to the summary file.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Item counts per owner key, kept in first-appearance order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemsByUser {
    entries: Vec<(String, u64)>,
}

impl ItemsByUser {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one item to the count for `key`
    pub fn increment(&mut self, key: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key.to_string(), 1)),
        }
    }

    /// Returns the count for `key`, if any item carried it
    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(key, count)` pairs in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }
}

impl Serialize for ItemsByUser {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Aggregate statistics over the fetched items
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SummaryStats {
    /// Distinct owner identifiers (a missing owner counts as `0`)
    pub unique_users: usize,

    /// Mean title length in characters, `0.0` for no items
    pub average_title_length: f64,

    /// Item count per owner key
    pub items_by_user: ItemsByUser,
}

/// The result of processing one fetched payload
///
/// Built once by [`process_data`](crate::summary::process_data) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedData {
    pub total_items: usize,

    /// Local time of aggregation, `YYYY-MM-DDTHH:MM:SS`
    pub processed_at: String,

    pub summary: SummaryStats,

    /// The fetched items, unchanged and in their original order
    pub items: Vec<Value>,
}

impl ProcessedData {
    /// Returns the view written to the summary file, without the items
    pub fn summary_document(&self) -> SummaryDocument<'_> {
        SummaryDocument {
            total_items: self.total_items,
            processed_at: &self.processed_at,
            summary: &self.summary,
        }
    }
}

/// Serialized form of the summary file
#[derive(Debug, serde::Serialize)]
pub struct SummaryDocument<'a> {
    pub total_items: usize,
    pub processed_at: &'a str,
    pub summary: &'a SummaryStats,
}
