//! Reader configuration
//!
//! Behavior that must be explicit rather than call-site-dependent:
//! the page-loop termination mode and an optional default page limit
//! applied when a caller leaves `Page.limit` at 0.

use serde::{Deserialize, Serialize};

use crate::page::{Page, PageMode};

/// Configuration for a [`Reader`](crate::reader::Reader)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Page-loop termination policy
    #[serde(default)]
    pub mode: PageMode,
    /// Per-page row cap used when the caller's page has `limit == 0`;
    /// 0 leaves the backend default
    #[serde(default)]
    pub default_limit: u32,
}

impl ReaderConfig {
    /// Single-page configuration (stop at the first logical page boundary)
    pub fn single_page() -> Self {
        Self {
            mode: PageMode::SinglePage,
            default_limit: 0,
        }
    }

    /// Drain-all configuration (follow every continuation)
    pub fn drain_all() -> Self {
        Self {
            mode: PageMode::DrainAll,
            default_limit: 0,
        }
    }

    /// Sets the default per-page row cap
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    /// Applies the default limit to a caller page, leaving explicit
    /// caller limits untouched
    pub fn effective_page(&self, page: &Page) -> Page {
        let mut effective = page.clone();
        if effective.limit == 0 {
            effective.limit = self.default_limit;
        }
        effective
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_single_page_without_limit() {
        let config = ReaderConfig::default();
        assert_eq!(config.mode, PageMode::SinglePage);
        assert_eq!(config.default_limit, 0);
    }

    #[test]
    fn default_limit_fills_only_unset_pages() {
        let config = ReaderConfig::drain_all().with_default_limit(50);

        let effective = config.effective_page(&Page::first());
        assert_eq!(effective.limit, 50);

        let explicit = config.effective_page(&Page::first().with_limit(10));
        assert_eq!(explicit.limit, 10);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ReaderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ReaderConfig::default());

        let config: ReaderConfig =
            serde_json::from_str(r#"{"mode":"drain_all","default_limit":25}"#).unwrap();
        assert_eq!(config.mode, PageMode::DrainAll);
        assert_eq!(config.default_limit, 25);
    }
}
