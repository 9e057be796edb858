use crate::error::TransportError;
use crate::source::EndpointKind;

use super::types::{ObjectOutcome, RunSummary};

/// Sink for run progress. Handed to the exporter explicitly; every hook
/// defaults to doing nothing.
pub trait ExportReporter: Send + Sync {
    fn listing_complete(&self, _endpoint: EndpointKind, _objects: usize) {}

    fn listing_failed(&self, _endpoint: EndpointKind, _error: &TransportError) {}

    fn object_finished(&self, _endpoint: EndpointKind, _object_id: &str, _outcome: &ObjectOutcome) {}

    fn run_complete(&self, _summary: &RunSummary) {}
}

/// Reports through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ExportReporter for TracingReporter {
    fn listing_complete(&self, endpoint: EndpointKind, objects: usize) {
        tracing::info!(target: "evdump.export", endpoint = %endpoint, objects, "objects listed");
    }

    fn listing_failed(&self, endpoint: EndpointKind, error: &TransportError) {
        tracing::error!(
            target: "evdump.export",
            endpoint = %endpoint,
            error = %error,
            "Error downloading data for {}",
            endpoint
        );
    }

    fn object_finished(&self, endpoint: EndpointKind, object_id: &str, outcome: &ObjectOutcome) {
        match outcome {
            ObjectOutcome::Written(table) => tracing::info!(
                target: "evdump.export",
                endpoint = %endpoint,
                object_id = %object_id,
                rows = table.rows,
                columns = table.columns.len(),
                path = %table.path.display(),
                "object exported"
            ),
            ObjectOutcome::NoEvents => tracing::warn!(
                target: "evdump.export",
                endpoint = %endpoint,
                object_id = %object_id,
                "No events found for {}",
                object_id
            ),
            ObjectOutcome::Failed(err) => tracing::error!(
                target: "evdump.export",
                endpoint = %endpoint,
                object_id = %object_id,
                error = %err,
                "Error processing {}/{}",
                endpoint,
                object_id
            ),
            ObjectOutcome::Skipped => tracing::debug!(
                target: "evdump.export",
                endpoint = %endpoint,
                object_id = %object_id,
                "skipped after cancellation"
            ),
        }
    }

    fn run_complete(&self, summary: &RunSummary) {
        let endpoint = summary.endpoint;
        tracing::info!(target: "evdump.export", "Processing complete for {}:", endpoint);
        tracing::info!(target: "evdump.export", "Total objects processed: {}", summary.processed());
        tracing::info!(
            target: "evdump.export",
            "Objects with no events: {}",
            summary.no_events.len()
        );
        if !summary.no_events.is_empty() {
            tracing::info!(
                target: "evdump.export",
                "IDs of objects with no events: {:?}",
                summary.no_events
            );
        }
        if !summary.failed.is_empty() {
            tracing::error!(
                target: "evdump.export",
                "Failed to download data for {} objects: {:?}",
                endpoint,
                summary.failed_ids()
            );
        }
        if summary.was_cancelled() {
            tracing::warn!(
                target: "evdump.export",
                "Cancelled before {} {} objects were started",
                summary.skipped.len(),
                endpoint
            );
        }
    }
}
