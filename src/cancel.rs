//! Cancellation signal for in-flight logical calls
//!
//! One token per call chain: cloning shares the flag, so an upstream
//! holder can abort the page loop from another thread. The driver
//! checks the flag before every backend round trip and returns no
//! partial results once it trips.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag (cheap to clone)
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, un-cancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Trips the flag; every clone observes it
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
