//! Public read surface: scan and query over a partitioned table
//!
//! Call flow (strict order per logical call):
//! 1. Compile filters/projection into a request descriptor
//! 2. Drive the page loop against the backend, accumulating rows
//! 3. Materialize rows into the caller's record shape
//! 4. Return records plus the next resume token
//!
//! Any stage failure aborts the call with no partial records and an
//! unadvanced cursor.

use serde::de::DeserializeOwned;

use crate::backend::FetchPage;
use crate::cancel::CancelToken;
use crate::config::ReaderConfig;
use crate::error::Result;
use crate::expression::{compile, Filter};
use crate::materialize::materialize;
use crate::observability::Logger;
use crate::page::{Page, PageToken};
use crate::pager::{PageDriver, SCAN_CURSOR_ATTRIBUTE};

/// Typed output of one logical read call
#[derive(Debug, Clone, PartialEq)]
pub struct ListOutput<T> {
    /// Materialized records in arrival order
    pub records: Vec<T>,
    /// Resume state for the next logical call
    pub page: PageToken,
}

/// Generic reader over a backend client.
///
/// Owns no state beyond the client and configuration; each call owns
/// its own compiled expression and accumulation buffer.
pub struct Reader<C> {
    client: C,
    config: ReaderConfig,
    cancel: CancelToken,
}

impl<C: FetchPage> Reader<C> {
    /// Creates a reader with the default configuration
    pub fn new(client: C) -> Self {
        Self::with_config(client, ReaderConfig::default())
    }

    /// Creates a reader with an explicit configuration
    pub fn with_config(client: C, config: ReaderConfig) -> Self {
        Self {
            client,
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Returns a handle that aborts in-flight calls when cancelled
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Returns the active configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Retrieves rows across the full key space (scan mode).
    ///
    /// Every filter is a post-filter; the cursor travels under the
    /// synthetic scan attribute.
    pub fn scan<T: DeserializeOwned>(
        &mut self,
        table: &str,
        filters: &[Filter],
        page: &Page,
        projection: &[String],
    ) -> Result<ListOutput<T>> {
        self.read("scan", table, None, filters, page, projection)
    }

    /// Retrieves rows from one partition (query mode).
    ///
    /// Exactly one filter must carry equality semantics on
    /// `partition_key`; it becomes the key condition. A filter list
    /// without one is rejected rather than degraded to a scan.
    pub fn query<T: DeserializeOwned>(
        &mut self,
        table: &str,
        partition_key: &str,
        filters: &[Filter],
        page: &Page,
        projection: &[String],
    ) -> Result<ListOutput<T>> {
        self.read("query", table, Some(partition_key), filters, page, projection)
    }

    fn read<T: DeserializeOwned>(
        &mut self,
        operation: &str,
        table: &str,
        partition_key: Option<&str>,
        filters: &[Filter],
        page: &Page,
        projection: &[String],
    ) -> Result<ListOutput<T>> {
        match self.try_read(table, partition_key, filters, page, projection) {
            Ok(out) => {
                Logger::info(
                    "READ_COMPLETE",
                    &[
                        ("operation", operation),
                        ("table", table),
                        ("rows", &out.records.len().to_string()),
                        (
                            "exhausted",
                            if out.page.is_exhausted() { "true" } else { "false" },
                        ),
                    ],
                );
                Ok(out)
            }
            Err(err) => {
                Logger::error(
                    "READ_FAILED",
                    &[
                        ("operation", operation),
                        ("table", table),
                        ("error", &err.to_string()),
                    ],
                );
                Err(err)
            }
        }
    }

    fn try_read<T: DeserializeOwned>(
        &mut self,
        table: &str,
        partition_key: Option<&str>,
        filters: &[Filter],
        page: &Page,
        projection: &[String],
    ) -> Result<ListOutput<T>> {
        let expression = compile(filters, partition_key, projection)?;
        let key_name = partition_key.unwrap_or(SCAN_CURSOR_ATTRIBUTE);
        let effective = self.config.effective_page(page);

        let (rows, next) = PageDriver::new(&mut self.client)
            .with_cancel(self.cancel.clone())
            .drive(table, &expression, key_name, &effective, self.config.mode)?;

        let records = materialize(rows)?;
        Ok(ListOutput { records, page: next })
    }
}
