//! Shared test backend: an in-memory, page-at-a-time store
//!
//! Filters rows through the crate's reference evaluator, pages by a
//! configurable internal page size, and rejects unknown tables and
//! foreign continuation tokens the way a remote store would.

// Each integration target uses a different subset of this module.
#![allow(dead_code)]

use quarry::backend::{
    FetchPage, Item, Key, PageRequest, PageResponse, RetrievalError, RetrievalResult,
};
use serde_json::Value;

/// In-memory single-table backend
pub struct MemoryStore {
    table: String,
    key_name: String,
    rows: Vec<Item>,
    page_size: usize,
    pub calls: usize,
}

impl MemoryStore {
    pub fn new(table: impl Into<String>, key_name: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            key_name: key_name.into(),
            rows: Vec::new(),
            page_size: 100,
            calls: 0,
        }
    }

    /// Caps how many rows the backend returns per page
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn insert(&mut self, row: Value) {
        self.rows.push(row.as_object().expect("row object").clone());
    }
}

impl FetchPage for MemoryStore {
    fn fetch_page(&mut self, request: PageRequest<'_>) -> RetrievalResult<PageResponse> {
        self.calls += 1;

        if request.table != self.table {
            return Err(RetrievalError::backend(request.table, "table not found"));
        }

        let matching: Vec<&Item> = self
            .rows
            .iter()
            .filter(|row| request.expression.matches(row))
            .collect();

        let start = match &request.exclusive_start_key {
            None => 0,
            Some(key) => {
                let want = key
                    .get(&self.key_name)
                    .ok_or_else(|| RetrievalError::backend(request.table, "bad start key"))?;
                match matching
                    .iter()
                    .position(|row| row.get(&self.key_name) == Some(want))
                {
                    Some(position) => position + 1,
                    None => {
                        return Err(RetrievalError::backend(
                            request.table,
                            "invalid continuation token",
                        ))
                    }
                }
            }
        };

        let mut cap = self.page_size;
        if let Some(limit) = request.limit {
            cap = cap.min(limit as usize);
        }
        let end = (start + cap).min(matching.len());

        let last_evaluated_key = if end > start && end < matching.len() {
            let boundary = matching[end - 1];
            let mut key = Key::new();
            key.insert(
                self.key_name.clone(),
                boundary
                    .get(&self.key_name)
                    .cloned()
                    .unwrap_or(Value::Null),
            );
            Some(key)
        } else {
            None
        };

        let mut items: Vec<Item> = matching[start..end].iter().map(|row| (*row).clone()).collect();
        if !request.expression.projection.is_empty() {
            for item in &mut items {
                item.retain(|name, _| request.expression.projection.iter().any(|p| p == name));
            }
        }

        Ok(PageResponse {
            items,
            last_evaluated_key,
        })
    }
}

/// Wrapper injecting a backend fault on the nth call (0-based)
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_on_call: usize,
    pub calls: usize,
}

impl FailingStore {
    pub fn new(inner: MemoryStore, fail_on_call: usize) -> Self {
        Self {
            inner,
            fail_on_call,
            calls: 0,
        }
    }
}

impl FetchPage for FailingStore {
    fn fetch_page(&mut self, request: PageRequest<'_>) -> RetrievalResult<PageResponse> {
        let call = self.calls;
        self.calls += 1;
        if call == self.fail_on_call {
            return Err(RetrievalError::backend(request.table, "throttled"));
        }
        self.inner.fetch_page(request)
    }
}
