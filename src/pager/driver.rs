//! Page loop over the backend's single-page retrieval
//!
//! Drive flow (strict order per logical call):
//! 1. Check the cancellation flag
//! 2. Fetch one page, resuming from the caller token on the first call
//!    and from the prior continuation key afterwards
//! 3. Append the page's rows to the accumulation buffer
//! 4. Terminate when the backend reports no continuation, or in
//!    single-page mode as soon as a page carries one
//!
//! Failures are all-or-nothing: a backend error or cancellation
//! discards every row already accumulated in this call.

use crate::backend::{FetchPage, Item, PageRequest, RetrievalError, RetrievalResult};
use crate::cancel::CancelToken;
use crate::expression::CompiledExpression;
use crate::observability::Logger;
use crate::page::{Page, PageMode, PageToken};

use super::cursor;

/// Drives the page loop for one logical retrieval call
pub struct PageDriver<'a, C> {
    client: &'a mut C,
    cancel: CancelToken,
}

impl<'a, C: FetchPage> PageDriver<'a, C> {
    /// Creates a driver over a backend client
    pub fn new(client: &'a mut C) -> Self {
        Self {
            client,
            cancel: CancelToken::new(),
        }
    }

    /// Attaches an upstream cancellation token
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Runs the loop, accumulating rows from every fetched page.
    ///
    /// `key_name` is the attribute the cursor travels under: the
    /// partition key in query mode, [`cursor::SCAN_CURSOR_ATTRIBUTE`]
    /// in scan mode.
    pub fn drive(
        &mut self,
        table: &str,
        expression: &CompiledExpression,
        key_name: &str,
        page: &Page,
        mode: PageMode,
    ) -> RetrievalResult<(Vec<Item>, PageToken)> {
        let limit = (page.limit > 0).then_some(page.limit);
        let mut start = cursor::start_key(page.token.as_deref(), key_name);
        let mut items: Vec<Item> = Vec::new();
        let mut pages = 0u32;

        loop {
            if self.cancel.is_cancelled() {
                return Err(RetrievalError::Cancelled);
            }

            let response = self.client.fetch_page(PageRequest {
                table,
                expression,
                exclusive_start_key: start.take(),
                limit,
            })?;
            pages += 1;

            Logger::trace(
                "PAGE_FETCHED",
                &[
                    ("table", table),
                    ("page", &pages.to_string()),
                    ("rows", &response.items.len().to_string()),
                ],
            );

            items.extend(response.items);

            match response.last_evaluated_key {
                None => return Ok((items, PageToken::exhausted())),
                Some(key) => match mode {
                    PageMode::SinglePage => {
                        let token = cursor::next_token(&key, key_name)?;
                        return Ok((items, PageToken::resume_at(token)));
                    }
                    PageMode::DrainAll => start = Some(key),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Key, PageResponse};
    use crate::expression::compile;
    use serde_json::json;

    /// Mock backend replaying canned pages
    struct PagedBackend {
        pages: Vec<PageResponse>,
        calls: Vec<Option<Key>>,
        fail_on_call: Option<usize>,
    }

    impl PagedBackend {
        fn new(pages: Vec<PageResponse>) -> Self {
            Self {
                pages,
                calls: Vec::new(),
                fail_on_call: None,
            }
        }

        fn failing_on(mut self, call: usize) -> Self {
            self.fail_on_call = Some(call);
            self
        }
    }

    impl FetchPage for PagedBackend {
        fn fetch_page(&mut self, request: PageRequest<'_>) -> RetrievalResult<PageResponse> {
            let call = self.calls.len();
            self.calls.push(request.exclusive_start_key.clone());
            if self.fail_on_call == Some(call) {
                return Err(RetrievalError::backend(request.table, "throttled"));
            }
            Ok(self.pages[call].clone())
        }
    }

    fn row(id: &str) -> Item {
        json!({"ID": id}).as_object().unwrap().clone()
    }

    fn continuation(id: &str) -> Key {
        json!({"ID": id}).as_object().unwrap().clone()
    }

    fn two_pages() -> Vec<PageResponse> {
        vec![
            PageResponse {
                items: vec![row("a"), row("b")],
                last_evaluated_key: Some(continuation("b")),
            },
            PageResponse {
                items: vec![row("c")],
                last_evaluated_key: None,
            },
        ]
    }

    #[test]
    fn drain_all_follows_every_continuation() {
        let mut backend = PagedBackend::new(two_pages());
        let expression = compile(&[], None, &[]).unwrap();

        let (items, token) = PageDriver::new(&mut backend)
            .drive("t", &expression, "ID", &Page::first(), PageMode::DrainAll)
            .unwrap();

        assert_eq!(items.len(), 3);
        assert!(token.is_exhausted());
        assert_eq!(backend.calls.len(), 2);
        // Second call resumes from the first page's continuation key
        assert_eq!(backend.calls[1], Some(continuation("b")));
    }

    #[test]
    fn single_page_stops_at_the_first_continuation() {
        let mut backend = PagedBackend::new(two_pages());
        let expression = compile(&[], None, &[]).unwrap();

        let (items, token) = PageDriver::new(&mut backend)
            .drive("t", &expression, "ID", &Page::first(), PageMode::SinglePage)
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(token, PageToken::resume_at("b"));
        assert_eq!(backend.calls.len(), 1);
    }

    #[test]
    fn caller_token_rides_the_first_call_only() {
        let mut backend = PagedBackend::new(two_pages());
        let expression = compile(&[], None, &[]).unwrap();

        PageDriver::new(&mut backend)
            .drive(
                "t",
                &expression,
                "ID",
                &Page::resume("zz"),
                PageMode::DrainAll,
            )
            .unwrap();

        assert_eq!(backend.calls[0], Some(continuation("zz")));
        assert_eq!(backend.calls[1], Some(continuation("b")));
    }

    #[test]
    fn positive_limit_is_forwarded_and_zero_is_not() {
        struct LimitProbe(Option<u32>);
        impl FetchPage for LimitProbe {
            fn fetch_page(&mut self, request: PageRequest<'_>) -> RetrievalResult<PageResponse> {
                self.0 = request.limit;
                Ok(PageResponse::default())
            }
        }

        let expression = compile(&[], None, &[]).unwrap();

        let mut probe = LimitProbe(None);
        PageDriver::new(&mut probe)
            .drive(
                "t",
                &expression,
                "ID",
                &Page::first().with_limit(25),
                PageMode::SinglePage,
            )
            .unwrap();
        assert_eq!(probe.0, Some(25));

        let mut probe = LimitProbe(Some(99));
        PageDriver::new(&mut probe)
            .drive("t", &expression, "ID", &Page::first(), PageMode::SinglePage)
            .unwrap();
        assert_eq!(probe.0, None);
    }

    #[test]
    fn backend_failure_discards_accumulated_rows() {
        let mut backend = PagedBackend::new(two_pages()).failing_on(1);
        let expression = compile(&[], None, &[]).unwrap();

        let result = PageDriver::new(&mut backend).drive(
            "t",
            &expression,
            "ID",
            &Page::first(),
            PageMode::DrainAll,
        );

        assert!(matches!(result, Err(RetrievalError::Backend { .. })));
    }

    #[test]
    fn cancellation_aborts_before_the_first_call() {
        let mut backend = PagedBackend::new(two_pages());
        let expression = compile(&[], None, &[]).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = PageDriver::new(&mut backend)
            .with_cancel(cancel)
            .drive("t", &expression, "ID", &Page::first(), PageMode::DrainAll);

        assert!(matches!(result, Err(RetrievalError::Cancelled)));
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn cancellation_between_pages_discards_accumulated_rows() {
        /// Backend that trips the cancel token while serving the first page
        struct CancellingBackend {
            pages: Vec<PageResponse>,
            cancel: CancelToken,
            calls: usize,
        }

        impl FetchPage for CancellingBackend {
            fn fetch_page(&mut self, _request: PageRequest<'_>) -> RetrievalResult<PageResponse> {
                let call = self.calls;
                self.calls += 1;
                self.cancel.cancel();
                Ok(self.pages[call].clone())
            }
        }

        let cancel = CancelToken::new();
        let mut backend = CancellingBackend {
            pages: two_pages(),
            cancel: cancel.clone(),
            calls: 0,
        };
        let expression = compile(&[], None, &[]).unwrap();

        // First page succeeds and carries a continuation; the flag trips
        // before the second round trip, so its rows must not escape.
        let result = PageDriver::new(&mut backend)
            .with_cancel(cancel)
            .drive("t", &expression, "ID", &Page::first(), PageMode::DrainAll);

        assert!(matches!(result, Err(RetrievalError::Cancelled)));
        assert_eq!(backend.calls, 1);
    }

    #[test]
    fn malformed_continuation_is_a_retrieval_error() {
        let pages = vec![PageResponse {
            items: vec![row("a")],
            last_evaluated_key: Some(json!({"Other": 1}).as_object().unwrap().clone()),
        }];
        let mut backend = PagedBackend::new(pages);
        let expression = compile(&[], None, &[]).unwrap();

        let result = PageDriver::new(&mut backend).drive(
            "t",
            &expression,
            "ID",
            &Page::first(),
            PageMode::SinglePage,
        );

        assert!(matches!(
            result,
            Err(RetrievalError::MalformedContinuation(_))
        ));
    }
}
