//! Backend seam for single-page filtered retrieval
//!
//! The store client (transport, auth, wire encoding) lives behind
//! [`FetchPage`]: one call retrieves one page of rows for a compiled
//! expression, optionally resuming from a continuation key. Everything
//! above this seam is backend-agnostic.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::expression::CompiledExpression;

/// One raw row: attribute name to tagged value
pub type Item = Map<String, Value>;

/// A composite key/attribute snapshot marking a page boundary
pub type Key = Map<String, Value>;

/// Result type for backend retrieval
pub type RetrievalResult<T> = Result<T, RetrievalError>;

/// Errors surfaced from the backend seam.
///
/// Never retried here; callers own retry policy. A corrupted or foreign
/// resume token surfaces through `Backend` (the store rejects it), not
/// through local validation.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The backend call failed (throttling, transport fault, rejected
    /// continuation key); the underlying cause is preserved verbatim
    #[error("backend retrieval failed for table '{table}': {source}")]
    Backend {
        table: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The backend reported a continuation key without the attribute the
    /// cursor is keyed by, or with a non-string value under it
    #[error("continuation key has no string value under attribute '{0}'")]
    MalformedContinuation(String),

    /// The logical call was cancelled before completion
    #[error("retrieval cancelled")]
    Cancelled,
}

impl RetrievalError {
    /// Wraps a backend fault with the table it occurred on
    pub fn backend(
        table: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Backend {
            table: table.into(),
            source: source.into(),
        }
    }
}

/// A single-page retrieval request against one table
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest<'a> {
    /// Table (collection) identifier
    pub table: &'a str,
    /// Compiled key/filter/projection descriptor
    pub expression: &'a CompiledExpression,
    /// Resume position; `None` starts from the beginning
    pub exclusive_start_key: Option<Key>,
    /// Per-page row cap; `None` leaves the backend default
    pub limit: Option<u32>,
}

/// One page of rows plus the continuation position, if any
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResponse {
    /// Rows in backend order
    pub items: Vec<Item>,
    /// Position of the next page; `None` means exhausted
    pub last_evaluated_key: Option<Key>,
}

/// Capability to retrieve one page of filtered rows
pub trait FetchPage {
    /// Executes a single-page retrieval.
    ///
    /// Implementations translate the compiled expression into the
    /// store's native query language and must not loop over pages
    /// themselves; the page driver owns iteration.
    fn fetch_page(&mut self, request: PageRequest<'_>) -> RetrievalResult<PageResponse>;
}
