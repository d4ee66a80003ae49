//! Page iteration and cursor management
//!
//! Reconciles the backend's page-at-a-time iteration with the caller's
//! "fetch rows, hand me a resumable cursor" contract. The driver owns
//! the loop and the accumulation buffer; the cursor module translates
//! between opaque caller tokens and backend key snapshots.

mod cursor;
mod driver;

pub use cursor::{next_token, start_key, SCAN_CURSOR_ATTRIBUTE};
pub use driver::PageDriver;
