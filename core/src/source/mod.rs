mod model;
mod retrying;
mod traits;

pub use model::{ApiObject, EndpointKind, Event, EventPage, ObjectPage, ProjectFilter};
pub use retrying::RetryingSource;
pub use traits::{ExportSource, FetchPageRequest, ListPageRequest, NoRetry, RetryStrategy};
