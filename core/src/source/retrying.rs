use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;

use super::model::{EventPage, ObjectPage};
use super::traits::{ExportSource, FetchPageRequest, ListPageRequest, RetryStrategy};

/// Wraps a source and re-issues individual page requests that fail with a
/// transient error. The pagination state of the caller is never touched, so a
/// retried page continues from the same `starting_after` / `cursor`.
pub struct RetryingSource<S> {
    inner: S,
    strategy: Arc<dyn RetryStrategy>,
}

impl<S: ExportSource> RetryingSource<S> {
    pub fn new(inner: S, strategy: Arc<dyn RetryStrategy>) -> Self {
        Self { inner, strategy }
    }

    async fn with_retry<T, F, Fut>(&self, op: &'static str, mut call: F) -> Result<T, TransportError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let err = match call().await {
                Ok(v) => return Ok(v),
                Err(err) => err,
            };

            if !self.strategy.should_retry(attempt, &err) {
                return Err(err);
            }
            let Some(delay) = self.strategy.next_delay(attempt, &err) else {
                return Err(err);
            };

            tracing::warn!(
                target: "evdump.retry",
                op = op,
                attempt = attempt,
                max_attempts = self.strategy.max_attempts(),
                strategy = self.strategy.name(),
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "transient failure, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl<S: ExportSource> ExportSource for RetryingSource<S> {
    async fn list_page(&self, req: ListPageRequest<'_>) -> Result<ObjectPage, TransportError> {
        self.with_retry("list", || self.inner.list_page(req)).await
    }

    async fn fetch_page(&self, req: FetchPageRequest<'_>) -> Result<EventPage, TransportError> {
        self.with_retry("fetch", || self.inner.fetch_page(req)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::error::TransportErrorKind;
    use crate::source::{EndpointKind, NoRetry};

    struct Flaky {
        failures_left: AtomicU32,
        calls: AtomicU32,
        error: TransportError,
    }

    impl Flaky {
        fn new(failures: u32, error: TransportError) -> Self {
            Self {
                failures_left: AtomicU32::new(failures),
                calls: AtomicU32::new(0),
                error,
            }
        }
    }

    #[async_trait]
    impl ExportSource for Flaky {
        async fn list_page(&self, _req: ListPageRequest<'_>) -> Result<ObjectPage, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let left = self.failures_left.load(Ordering::SeqCst);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::SeqCst);
                return Err(self.error.clone());
            }
            Ok(ObjectPage::default())
        }

        async fn fetch_page(&self, _req: FetchPageRequest<'_>) -> Result<EventPage, TransportError> {
            unreachable!("not used")
        }
    }

    struct Immediate(u32);

    impl RetryStrategy for Immediate {
        fn name(&self) -> &str {
            "immediate"
        }
        fn next_delay(&self, _attempt: u32, _error: &TransportError) -> Option<Duration> {
            Some(Duration::ZERO)
        }
        fn max_attempts(&self) -> u32 {
            self.0
        }
    }

    fn list_req() -> ListPageRequest<'static> {
        ListPageRequest {
            endpoint: EndpointKind::Experiment,
            filter: None,
            limit: 10,
            starting_after: None,
        }
    }

    fn unavailable() -> TransportError {
        TransportError::status_error(503, "http://test/v1/experiment", "unavailable")
    }

    #[tokio::test]
    async fn transient_failures_are_retried_until_success() {
        let source = RetryingSource::new(Flaky::new(2, unavailable()), Arc::new(Immediate(3)));
        source.list_page(list_req()).await.unwrap();
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_budget_is_bounded() {
        let source = RetryingSource::new(Flaky::new(5, unavailable()), Arc::new(Immediate(3)));
        let err = source.list_page(list_req()).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_failures_are_not_retried() {
        let not_found = TransportError::status_error(404, "http://test", "missing");
        let source = RetryingSource::new(Flaky::new(1, not_found), Arc::new(Immediate(3)));
        let err = source.list_page(list_req()).await.unwrap_err();
        assert_eq!(err.kind(), TransportErrorKind::Status);
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn no_retry_surfaces_first_failure() {
        let source = RetryingSource::new(Flaky::new(1, unavailable()), Arc::new(NoRetry));
        assert!(source.list_page(list_req()).await.is_err());
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);
    }
}
