//! Reference evaluation of compiled conditions against rows
//!
//! Matches rows strictly according to comparators. No type coercion,
//! missing and null attributes never match. Backends that filter
//! locally (and the in-memory test backend) evaluate through here;
//! remote backends consume the descriptor in their own language.

use serde_json::Value;

use crate::backend::Item;

use super::ast::{Comparator, CompiledExpression, Condition};

impl CompiledExpression {
    /// Checks whether a row satisfies the key condition and every
    /// residual predicate (AND semantics). An empty residual filter
    /// matches everything.
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(key) = &self.key_condition {
            match item.get(&key.name) {
                Some(actual) if *actual == key.value => {}
                _ => return false,
            }
        }
        self.filter.iter().all(|cond| cond.matches(item))
    }
}

impl Condition {
    /// Checks whether a row satisfies this single predicate
    pub fn matches(&self, item: &Item) -> bool {
        let actual = match item.get(&self.field) {
            Some(v) => v,
            None => return false, // missing attribute = no match
        };
        if actual.is_null() {
            return false;
        }

        match self.cmp {
            Comparator::Equal => *actual == self.value,
            Comparator::LessThan => ordered_match(actual, &self.value, |o| {
                o == std::cmp::Ordering::Less
            }),
            Comparator::GreaterThan => ordered_match(actual, &self.value, |o| {
                o == std::cmp::Ordering::Greater
            }),
            Comparator::Contains => contains_match(actual, &self.value),
            Comparator::ContainsAll => set_match(actual, &self.value, |attr, val| {
                val.iter().all(|v| attr.contains(v))
            }),
            Comparator::ContainedBy => set_match(actual, &self.value, |attr, val| {
                attr.iter().all(|a| val.contains(a))
            }),
        }
    }
}

/// Ordering comparison for numbers and strings (no cross-type coercion)
fn ordered_match(
    actual: &Value,
    bound: &Value,
    accept: impl Fn(std::cmp::Ordering) -> bool,
) -> bool {
    match (actual, bound) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                return accept(ai.cmp(&bi));
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(af), Some(bf)) => af
                    .partial_cmp(&bf)
                    .map(&accept)
                    .unwrap_or(false),
                _ => false,
            }
        }
        (Value::String(a), Value::String(b)) => accept(a.as_str().cmp(b.as_str())),
        _ => false,
    }
}

/// Containment: substring for strings, membership for arrays
fn contains_match(actual: &Value, needle: &Value) -> bool {
    match (actual, needle) {
        (Value::String(haystack), Value::String(part)) => haystack.contains(part.as_str()),
        (Value::Array(elements), needle) => elements.contains(needle),
        _ => false,
    }
}

/// Set comparison over array-typed attribute and value
fn set_match(
    actual: &Value,
    value: &Value,
    relation: impl Fn(&[Value], &[Value]) -> bool,
) -> bool {
    match (actual, value) {
        (Value::Array(attr), Value::Array(val)) => relation(attr, val),
        _ => false,
    }
}
