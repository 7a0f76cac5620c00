//! JSON helpers for columns declared with `Vec<T>` shapes.
//!
//! Collections on an entity are stored as JSON text in a single column;
//! these helpers convert between the Rust shape and the stored text in
//! `to_row` / `from_row` implementations.

use serde::{Deserialize, Serialize};

/// Serializes a value for a JSON column. Falls back to SQL-friendly
/// `"null"` when serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Reads a JSON column that may be NULL, empty, or absent.
pub fn from_optional_json<T: for<'de> Deserialize<'de>>(
    result: rusqlite::Result<String>,
) -> Option<T> {
    match result {
        Ok(s) if !s.is_empty() && s != "null" => serde_json::from_str(&s).ok(),
        _ => None,
    }
}
