//! Aggregation of fetched items into a summary record
//!
//! Items are treated as opaque JSON objects. Only the owner identifier
//! (`userId`) and the `title` are inspected; malformed shapes are rejected
//! rather than coerced.

use crate::summary::types::{ItemsByUser, ProcessedData, SummaryStats};
use crate::AggregateError;
use chrono::Local;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Key holding the owner identifier of an item
pub const OWNER_KEY: &str = "userId";

/// Key holding the title of an item
pub const TITLE_KEY: &str = "title";

/// Group name for items without an owner identifier
pub const UNKNOWN_OWNER: &str = "unknown";

/// Identity of an owner for distinct counting
///
/// Numbers compare by value, so `1`, `1.0` and `true` are the same owner.
#[derive(Debug, PartialEq, Eq, Hash)]
enum DistinctOwner {
    Integer(i128),
    Float(u64),
    Text(String),
    Null,
}

impl DistinctOwner {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(DistinctOwner::Null),
            Value::Bool(b) => Some(DistinctOwner::Integer(i128::from(*b))),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(DistinctOwner::Integer(i128::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Some(DistinctOwner::Integer(i128::from(u)))
                } else {
                    let f = n.as_f64()?;
                    if f.fract() == 0.0 && f.abs() < 1e18 {
                        Some(DistinctOwner::Integer(f as i128))
                    } else {
                        Some(DistinctOwner::Float(f.to_bits()))
                    }
                }
            }
            Value::String(s) => Some(DistinctOwner::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Renders an owner identifier as its grouping key
///
/// Integers render as digits, floats as their JSON text, strings as
/// themselves, booleans as `True`/`False` and null as `None`.
/// Returns `None` for arrays and objects, which cannot identify an owner.
///
/// Floats with exponents render as serde_json writes them (`1e20`, not
/// `1e+20`); such owner keys are accepted as-is.
pub fn owner_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("None".to_string()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn title_length(item: &Map<String, Value>, index: usize) -> Result<usize, AggregateError> {
    match item.get(TITLE_KEY) {
        None => Ok(0),
        Some(Value::String(title)) => Ok(title.chars().count()),
        Some(_) => Err(AggregateError::TitleNotString { index }),
    }
}

/// Processes the fetched payload into a summary record
///
/// # Arguments
///
/// * `payload` - The fetched JSON value, expected to be an array of objects
///
/// # Returns
///
/// * `Ok(ProcessedData)` - Statistics plus the original items
/// * `Err(AggregateError)` - The payload or one of its items has the wrong shape
pub fn process_data(payload: Value) -> Result<ProcessedData, AggregateError> {
    tracing::info!("Processing fetched data...");

    let items = match payload {
        Value::Array(items) => items,
        other => return Err(AggregateError::NotAnArray(describe(&other))),
    };

    let processed_at = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();

    let mut distinct_owners = HashSet::new();
    let mut items_by_user = ItemsByUser::new();
    let mut title_chars = 0usize;

    for (index, item) in items.iter().enumerate() {
        let object = item
            .as_object()
            .ok_or(AggregateError::ItemNotObject { index })?;

        match object.get(OWNER_KEY) {
            Some(owner) => {
                let distinct = DistinctOwner::from_value(owner)
                    .ok_or(AggregateError::UnhashableOwner { index })?;
                let key = owner_key(owner).ok_or(AggregateError::UnhashableOwner { index })?;
                distinct_owners.insert(distinct);
                items_by_user.increment(&key);
            }
            None => {
                // Missing owners share the 0 sentinel when counting distinct users
                distinct_owners.insert(DistinctOwner::Integer(0));
                items_by_user.increment(UNKNOWN_OWNER);
            }
        }

        title_chars += title_length(object, index)?;
    }

    let total_items = items.len();
    let average_title_length = if total_items > 0 {
        title_chars as f64 / total_items as f64
    } else {
        0.0
    };

    let processed = ProcessedData {
        total_items,
        processed_at,
        summary: SummaryStats {
            unique_users: distinct_owners.len(),
            average_title_length,
            items_by_user,
        },
        items,
    };

    tracing::info!(
        "Processed {} items from {} users",
        processed.total_items,
        processed.summary.unique_users
    );

    Ok(processed)
}
