//! Cursor translation between caller tokens and backend key snapshots
//!
//! The backend marks page boundaries with a composite key/attribute
//! snapshot; callers see a single opaque string. Query mode keys the
//! snapshot by the partition key, scan mode by a fixed synthetic
//! attribute. Tokens are never interpreted beyond shape: a corrupted or
//! foreign token is the backend's to reject.

use serde_json::Value;

use crate::backend::{Key, RetrievalError, RetrievalResult};

/// Synthetic key attribute carrying the cursor in scan mode
pub const SCAN_CURSOR_ATTRIBUTE: &str = "Key";

/// Wraps a caller resume token into the backend's key shape.
///
/// Returns `None` when there is no token, meaning "start from the
/// beginning".
pub fn start_key(token: Option<&str>, key_name: &str) -> Option<Key> {
    token.map(|value| {
        let mut key = Key::new();
        key.insert(key_name.to_string(), Value::String(value.to_string()));
        key
    })
}

/// Extracts the resume token from a backend continuation key.
///
/// The continuation must hold a string value under `key_name`; anything
/// else is a malformed backend response, reported as a retrieval error.
pub fn next_token(last_evaluated_key: &Key, key_name: &str) -> RetrievalResult<String> {
    match last_evaluated_key.get(key_name) {
        Some(Value::String(token)) => Ok(token.clone()),
        _ => Err(RetrievalError::MalformedContinuation(key_name.to_string())),
    }
}
