//! Filter and expression structures for the read path
//!
//! Defines the caller-facing filter vocabulary and the compiled
//! expression descriptor handed to the backend.

use serde_json::Value;

/// Match behaviors available to filters (closed enumeration).
///
/// `MatchExact` is an alias of `EqualTo`; both carry equality semantics.
/// The set-valued behaviors (`MatchSuperset`, `MatchSubset`) compare the
/// attribute's array against the filter value's array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchBehavior {
    /// Attribute contains the value (substring or array membership)
    MatchAny,
    /// Exact equality (alias of `EqualTo`)
    MatchExact,
    /// Attribute array is a superset of the value array
    MatchSuperset,
    /// Attribute array is a subset of the value array
    MatchSubset,
    /// Attribute < value
    LessThan,
    /// Attribute > value
    GreaterThan,
    /// Attribute = value
    EqualTo,
}

impl MatchBehavior {
    /// Returns true if this behavior carries equality semantics
    pub fn is_equality(&self) -> bool {
        matches!(self, MatchBehavior::EqualTo | MatchBehavior::MatchExact)
    }

    /// Maps this behavior onto its compiled comparator.
    ///
    /// The mapping is total: every behavior compiles to exactly one
    /// comparator, enforced by match exhaustiveness.
    pub fn comparator(&self) -> Comparator {
        match self {
            MatchBehavior::EqualTo | MatchBehavior::MatchExact => Comparator::Equal,
            MatchBehavior::LessThan => Comparator::LessThan,
            MatchBehavior::GreaterThan => Comparator::GreaterThan,
            MatchBehavior::MatchAny => Comparator::Contains,
            MatchBehavior::MatchSuperset => Comparator::ContainsAll,
            MatchBehavior::MatchSubset => Comparator::ContainedBy,
        }
    }
}

/// A single caller-supplied filter (attribute + behavior + value)
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Attribute name (must be non-empty)
    pub name: String,
    /// Match behavior
    pub op: MatchBehavior,
    /// Comparison value
    pub value: Value,
}

impl Filter {
    /// Creates a filter with an arbitrary behavior
    pub fn new(name: impl Into<String>, op: MatchBehavior, value: Value) -> Self {
        Self {
            name: name.into(),
            op,
            value,
        }
    }

    /// Creates an equality filter
    pub fn eq(name: impl Into<String>, value: Value) -> Self {
        Self::new(name, MatchBehavior::EqualTo, value)
    }

    /// Creates a less-than filter
    pub fn lt(name: impl Into<String>, value: Value) -> Self {
        Self::new(name, MatchBehavior::LessThan, value)
    }

    /// Creates a greater-than filter
    pub fn gt(name: impl Into<String>, value: Value) -> Self {
        Self::new(name, MatchBehavior::GreaterThan, value)
    }

    /// Creates a containment filter
    pub fn contains(name: impl Into<String>, value: Value) -> Self {
        Self::new(name, MatchBehavior::MatchAny, value)
    }

    /// Returns true if this filter is a key condition candidate for the
    /// given partition key
    pub fn is_key_condition(&self, partition_key: &str) -> bool {
        self.name == partition_key && self.op.is_equality()
    }
}

/// Compiled comparator forms (one per distinct predicate shape)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Strict equality, no coercion
    Equal,
    /// Attribute < value
    LessThan,
    /// Attribute > value
    GreaterThan,
    /// Attribute contains value (substring or membership)
    Contains,
    /// Attribute array contains every element of the value array
    ContainsAll,
    /// Every element of the attribute array appears in the value array
    ContainedBy,
}

/// One compiled predicate fragment of the residual condition
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Attribute name
    pub field: String,
    /// Comparator form
    pub cmp: Comparator,
    /// Comparison value
    pub value: Value,
}

/// Partition-key equality condition (equality only, by construction)
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCondition {
    /// Partition key attribute name
    pub name: String,
    /// Required key value
    pub value: Value,
}

/// The compiled request descriptor produced by [`compile`].
///
/// [`compile`]: super::compile::compile
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledExpression {
    /// Key-equality condition (query mode only)
    pub key_condition: Option<KeyCondition>,
    /// Residual predicates, ANDed in encounter order; empty means
    /// "no filter", never "match nothing"
    pub filter: Vec<Condition>,
    /// Attribute projection; empty means "all attributes"
    pub projection: Vec<String>,
}

impl CompiledExpression {
    /// Returns true if a residual filter condition is attached
    pub fn has_filter(&self) -> bool {
        !self.filter.is_empty()
    }

    /// Returns true if a projection is attached
    pub fn has_projection(&self) -> bool {
        !self.projection.is_empty()
    }
}
