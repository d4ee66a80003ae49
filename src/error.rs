//! Top-level error taxonomy for the read path
//!
//! Each stage wraps its own cause and passes it upward unchanged in
//! kind: compilation errors stay local, retrieval errors surface the
//! backend fault verbatim, materialization errors abort the call.
//! Nothing here retries, swallows, or downgrades.

use thiserror::Error;

use crate::backend::RetrievalError;
use crate::expression::ExpressionError;
use crate::materialize::MaterializeError;

/// Result type for the public read operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from a logical read call, tagged by the stage that failed
#[derive(Debug, Error)]
pub enum Error {
    /// Filter/projection input was malformed; never retried
    #[error("expression compilation failed: {0}")]
    Compile(#[from] ExpressionError),

    /// The backend call failed; callers own retry policy
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    /// Rows did not fit the requested record shape
    #[error("materialization failed: {0}")]
    Materialize(#[from] MaterializeError),
}
