//! Pagination contract: input page request, output resume state
//!
//! The contract is two-valued: callers pass a [`Page`] in and receive a
//! fresh [`PageToken`] back. Nothing is mutated in place, so concurrent
//! logical calls can never alias pagination state.

use serde::{Deserialize, Serialize};

/// Page-loop termination policy.
///
/// The driver always stops when the backend reports no continuation;
/// the mode decides what happens when a page *does* carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageMode {
    /// Stop at the first page returning a continuation marker and
    /// surface that marker as the resume token
    #[default]
    SinglePage,
    /// Follow every continuation until the key space is exhausted;
    /// the resume token is always empty on success
    DrainAll,
}

/// Caller-supplied pagination request (input only, never mutated)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Opaque resume token from a prior call; `None` starts fresh
    pub token: Option<String>,
    /// Per-page row cap; 0 leaves the backend default
    pub limit: u32,
}

impl Page {
    /// Starts from the beginning with the backend's default page size
    pub fn first() -> Self {
        Self::default()
    }

    /// Resumes from a token produced by a prior logical call
    pub fn resume(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            limit: 0,
        }
    }

    /// Sets the per-page row cap
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Resume state reported back to the caller (constructed fresh per call)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageToken {
    /// Token for the next logical call; `None` means exhausted
    pub next: Option<String>,
}

impl PageToken {
    /// The exhausted token: no further pages
    pub fn exhausted() -> Self {
        Self { next: None }
    }

    /// Wraps a continuation value as a resume token
    pub fn resume_at(token: impl Into<String>) -> Self {
        Self {
            next: Some(token.into()),
        }
    }

    /// Returns true if the key space was fully consumed
    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }
}
