mod cancel;
mod report;
mod run;
mod types;

pub use cancel::CancelSignal;
pub use report::{ExportReporter, TracingReporter};
pub use run::Exporter;
pub use types::{ExportOptions, FailedObject, ObjectOutcome, RunSummary};
