//! Predicate compilation for the read path
//!
//! Turns caller filter lists into a backend request descriptor: an
//! optional partition-key equality condition, a residual AND filter,
//! and an attribute projection.
//!
//! # Compilation rules (strict order)
//!
//! 1. Filters are walked in caller order
//! 2. In query mode the first equality filter on the partition key
//!    becomes the key condition; a second one is rejected
//! 3. Every other filter becomes one residual predicate, ANDed in
//!    encounter order
//! 4. "No residual filters" is distinct from "filter matching nothing"
//!
//! The `eval` module carries the reference evaluator used by backends
//! that filter locally.

mod ast;
mod compile;
mod errors;
mod eval;

pub use ast::{Comparator, CompiledExpression, Condition, Filter, KeyCondition, MatchBehavior};
pub use compile::compile;
pub use errors::{ExpressionError, ExpressionResult};
