//! quarry - a generic query/scan core over partitioned key-value stores
//!
//! Compiles backend-agnostic filter/projection/pagination requests into
//! a store-native descriptor, drives the backend's paged retrieval to a
//! logical page boundary, and materializes raw rows into caller-typed
//! records with a resumable cursor.

pub mod backend;
pub mod cancel;
pub mod config;
pub mod error;
pub mod expression;
pub mod materialize;
pub mod observability;
pub mod page;
pub mod pager;
pub mod reader;
