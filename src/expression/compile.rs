//! Compiles caller filters into a backend request descriptor
//!
//! Compilation flow:
//! 1. Validate projection names
//! 2. Walk filters in caller order, extracting the partition-key
//!    equality (query mode) and accumulating residual conditions
//! 3. Reject duplicate key-equality filters and keyless queries
//!
//! Compilation is pure: same input always yields a structurally
//! equal descriptor, and no filter is ever partially applied.

use super::ast::{CompiledExpression, Condition, Filter, KeyCondition};
use super::errors::{ExpressionError, ExpressionResult};

/// Compiles filters plus an optional partition key and projection into a
/// [`CompiledExpression`].
///
/// `partition_key = Some(..)` selects query mode: exactly one filter must
/// carry equality semantics on that key, and it becomes the key condition
/// rather than a residual predicate. `partition_key = None` selects scan
/// mode, where every filter is residual.
pub fn compile(
    filters: &[Filter],
    partition_key: Option<&str>,
    projection: &[String],
) -> ExpressionResult<CompiledExpression> {
    if projection.iter().any(|name| name.is_empty()) {
        return Err(ExpressionError::EmptyProjectionName);
    }

    let mut key_condition: Option<KeyCondition> = None;
    let mut residual = Vec::new();

    for filter in filters {
        if filter.name.is_empty() {
            return Err(ExpressionError::EmptyFilterName);
        }

        if let Some(key) = partition_key {
            if filter.is_key_condition(key) {
                if key_condition.is_some() {
                    return Err(ExpressionError::DuplicateKeyCondition(key.to_string()));
                }
                key_condition = Some(KeyCondition {
                    name: filter.name.clone(),
                    value: filter.value.clone(),
                });
                continue;
            }
        }

        residual.push(Condition {
            field: filter.name.clone(),
            cmp: filter.op.comparator(),
            value: filter.value.clone(),
        });
    }

    if let Some(key) = partition_key {
        if key_condition.is_none() {
            return Err(ExpressionError::MissingKeyCondition(key.to_string()));
        }
    }

    Ok(CompiledExpression {
        key_condition,
        filter: residual,
        projection: projection.to_vec(),
    })
}
