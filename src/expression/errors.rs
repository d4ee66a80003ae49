//! Expression compilation errors
//!
//! All errors here are local caller mistakes: they are never retried
//! and never reach the backend.

use thiserror::Error;

/// Result type for expression compilation
pub type ExpressionResult<T> = Result<T, ExpressionError>;

/// Errors raised while compiling filters and projections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// A filter referenced an empty attribute name
    #[error("filter attribute name must not be empty")]
    EmptyFilterName,

    /// A projection entry was an empty attribute name
    #[error("projection attribute name must not be empty")]
    EmptyProjectionName,

    /// More than one filter claimed the partition key with equality semantics
    #[error("duplicate key-equality filter on partition key '{0}'")]
    DuplicateKeyCondition(String),

    /// Query mode without an equality filter on the partition key
    #[error("query requires exactly one equality filter on partition key '{0}'")]
    MissingKeyCondition(String),
}
