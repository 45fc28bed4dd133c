//! Key/value mapping loader for batch runs.
//!
//! The mapping is a flat JSON object: output key → filter value, e.g.
//! `{"users_table": "TBL001", "orders_table": "TBL002"}`. Entry order follows
//! the file (serde_json's `preserve_order` feature), so batch outcomes line
//! up with what the author wrote.

use crate::error::{Result, SiftError};
use std::path::Path;

/// One batch entry: the output identifier and the value to filter for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub key: String,
    pub value: String,
}

/// Load a mapping file into ordered entries.
///
/// Values may be JSON strings, numbers, or booleans; anything nested is
/// rejected. Keys must be usable as output identifiers (non-empty after
/// filesystem sanitization).
///
/// # Errors
///
/// [`SiftError::MalformedMapping`] for unreadable/invalid structure and
/// [`SiftError::EmptyMapping`] for an object with no entries.
pub fn load_mapping(path: &Path) -> Result<Vec<MappingEntry>> {
    let content = std::fs::read_to_string(path)?;
    parse_mapping(&content)
}

/// Parse mapping JSON (see [`load_mapping`]).
pub fn parse_mapping(content: &str) -> Result<Vec<MappingEntry>> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    let object = value
        .as_object()
        .ok_or_else(|| SiftError::MalformedMapping("expected a JSON object".to_owned()))?;

    let mut entries = Vec::with_capacity(object.len());
    for (key, value) in object {
        if crate::sink::safe_file_stem(key).is_empty() {
            return Err(SiftError::MalformedMapping(format!(
                "key '{key}' is not usable as an output identifier"
            )));
        }
        let value = scalar_text(value).ok_or_else(|| {
            SiftError::MalformedMapping(format!("value for key '{key}' is not a scalar"))
        })?;
        entries.push(MappingEntry {
            key: key.clone(),
            value,
        });
    }

    if entries.is_empty() {
        return Err(SiftError::EmptyMapping);
    }
    Ok(entries)
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
