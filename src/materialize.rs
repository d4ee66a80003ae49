//! Row materialization into caller-typed records
//!
//! Deserialization itself is delegated to serde: rows are JSON object
//! maps, records are any `DeserializeOwned` shape, fields map by name.
//! Unknown attributes are ignored; callers wanting zero-value fill for
//! absent attributes use `#[serde(default)]` on their shapes.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::backend::Item;

/// Result type for materialization
pub type MaterializeResult<T> = Result<T, MaterializeError>;

/// Row-shape mismatch while materializing a logical call's rows
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// A row did not fit the target record shape; the whole call's
    /// output is discarded
    #[error("row {row} does not match the record shape: {source}")]
    Shape {
        row: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Deserializes every accumulated row into one record each.
///
/// All-or-nothing: the first mismatching row fails the call and no
/// partial record list is returned.
pub fn materialize<T: DeserializeOwned>(rows: Vec<Item>) -> MaterializeResult<Vec<T>> {
    rows.into_iter()
        .enumerate()
        .map(|(row, item)| {
            serde_json::from_value(Value::Object(item))
                .map_err(|source| MaterializeError::Shape { row, source })
        })
        .collect()
}
