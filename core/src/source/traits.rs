use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;

use super::model::{EndpointKind, EventPage, ObjectPage, ProjectFilter};

/// One request against `GET /v1/{endpoint}`.
#[derive(Debug, Clone, Copy)]
pub struct ListPageRequest<'a> {
    pub endpoint: EndpointKind,
    pub filter: Option<&'a ProjectFilter>,
    pub limit: usize,
    pub starting_after: Option<&'a str>,
}

/// One request against `GET /v1/{endpoint}/{object_id}/fetch`.
#[derive(Debug, Clone, Copy)]
pub struct FetchPageRequest<'a> {
    pub endpoint: EndpointKind,
    pub object_id: &'a str,
    pub limit: usize,
    pub cursor: Option<&'a str>,
}

/// Page-level access to the remote API. Pagination loops live above this seam.
#[async_trait]
pub trait ExportSource: Send + Sync {
    async fn list_page(&self, req: ListPageRequest<'_>) -> Result<ObjectPage, TransportError>;

    async fn fetch_page(&self, req: FetchPageRequest<'_>) -> Result<EventPage, TransportError>;
}

/// Decides whether, and after how long, a failed request is attempted again.
pub trait RetryStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Delay before attempt `attempt + 1`, where `attempt` counts completed
    /// attempts (starting at 1). `None` stops retrying.
    fn next_delay(&self, attempt: u32, error: &TransportError) -> Option<Duration>;

    fn max_attempts(&self) -> u32;

    fn should_retry(&self, attempt: u32, error: &TransportError) -> bool {
        attempt < self.max_attempts() && error.is_transient()
    }
}

/// Surfaces every failure on the first attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRetry;

impl RetryStrategy for NoRetry {
    fn name(&self) -> &str {
        "none"
    }

    fn next_delay(&self, _attempt: u32, _error: &TransportError) -> Option<Duration> {
        None
    }

    fn max_attempts(&self) -> u32 {
        1
    }
}
