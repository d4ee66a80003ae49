//! Observability for the read path
//!
//! Structured, synchronous JSON logging. One line per event, no
//! buffering, deterministic field ordering.

mod logger;

pub use logger::{Logger, Severity};
