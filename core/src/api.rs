//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `evdump_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, resolve_api_key, ApiConfig, AppConfig, ExportConfig, LoggingConfig,
    RetryConfig, API_KEY_ENV,
};
pub use crate::error::{CliError, ExportError, TransportError, TransportErrorKind, WriteError};
pub use crate::export::{
    CancelSignal, ExportOptions, ExportReporter, Exporter, FailedObject, ObjectOutcome,
    RunSummary, TracingReporter,
};
pub use crate::normalize::{normalize, CellValue, NormalizedRecord};
pub use crate::pagination::{fetch_events, list_objects};
pub use crate::source::{
    ApiObject, EndpointKind, Event, EventPage, ExportSource, FetchPageRequest, ListPageRequest,
    NoRetry, ObjectPage, ProjectFilter, RetryStrategy, RetryingSource,
};
pub use crate::table::{TableWriter, WriteOutcome, WrittenTable};
