use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::Semaphore;

use crate::error::{ExportError, TransportError, WriteError};
use crate::normalize::{normalize, NormalizedRecord};
use crate::pagination::{fetch_events, list_objects};
use crate::source::{ApiObject, EndpointKind, ExportSource, ProjectFilter};
use crate::table::{TableWriter, WriteOutcome};

use super::cancel::CancelSignal;
use super::report::{ExportReporter, TracingReporter};
use super::types::{ExportOptions, ObjectOutcome, RunSummary};

/// Drives list → fetch → normalize → write for one endpoint kind at a time.
pub struct Exporter {
    source: Arc<dyn ExportSource>,
    writer: TableWriter,
    options: ExportOptions,
    reporter: Arc<dyn ExportReporter>,
    cancel: CancelSignal,
}

impl Exporter {
    pub fn new(source: Arc<dyn ExportSource>, writer: TableWriter, options: ExportOptions) -> Self {
        Self {
            source,
            writer,
            options,
            reporter: Arc::new(TracingReporter),
            cancel: CancelSignal::new(),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ExportReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    /// Export every object of `endpoint`.
    ///
    /// Only a listing failure fails the run. Per-object fetch and write
    /// failures are recorded in the summary and the remaining objects carry
    /// on. Up to `max_parallel` objects are in flight at once; once the cancel
    /// signal fires, objects not yet started are reported as skipped.
    #[tracing::instrument(name = "export.run", skip_all, fields(endpoint = %endpoint))]
    pub async fn run(
        &self,
        endpoint: EndpointKind,
        filter: Option<&ProjectFilter>,
    ) -> Result<RunSummary, TransportError> {
        let objects = match list_objects(
            self.source.as_ref(),
            endpoint,
            filter,
            self.options.object_page_size,
        )
        .await
        {
            Ok(objects) => objects,
            Err(err) => {
                self.reporter.listing_failed(endpoint, &err);
                return Err(err);
            }
        };
        self.reporter.listing_complete(endpoint, objects.len());

        let sem = Semaphore::new(self.options.max_parallel.max(1));
        let mut futs: FuturesUnordered<_> = objects
            .iter()
            .enumerate()
            .map(|(idx, object)| {
                let sem = &sem;
                async move {
                    let Ok(_permit) = sem.acquire().await else {
                        return (idx, ObjectOutcome::Skipped);
                    };
                    if self.cancel.is_cancelled() {
                        return (idx, ObjectOutcome::Skipped);
                    }
                    (idx, self.export_object(endpoint, object).await)
                }
            })
            .collect();

        let mut outcomes: Vec<Option<ObjectOutcome>> = objects.iter().map(|_| None).collect();
        while let Some((idx, outcome)) = futs.next().await {
            self.reporter
                .object_finished(endpoint, &objects[idx].id, &outcome);
            outcomes[idx] = Some(outcome);
        }
        drop(futs);

        let mut summary = RunSummary::new(endpoint);
        summary.listed = objects.len();
        for (object, outcome) in objects.iter().zip(outcomes) {
            summary.record(&object.id, &outcome.unwrap_or(ObjectOutcome::Skipped));
        }

        self.reporter.run_complete(&summary);
        Ok(summary)
    }

    /// Fetch, normalize and write a single object. Never panics or propagates;
    /// every failure is folded into the returned outcome.
    pub async fn export_object(&self, endpoint: EndpointKind, object: &ApiObject) -> ObjectOutcome {
        match self.try_export_object(endpoint, &object.id).await {
            Ok(WriteOutcome::Written(table)) => ObjectOutcome::Written(table),
            Ok(WriteOutcome::NoEvents) => ObjectOutcome::NoEvents,
            Err(err) => ObjectOutcome::Failed(err),
        }
    }

    async fn try_export_object(
        &self,
        endpoint: EndpointKind,
        object_id: &str,
    ) -> Result<WriteOutcome, ExportError> {
        let events = fetch_events(
            self.source.as_ref(),
            endpoint,
            object_id,
            self.options.event_page_size,
        )
        .await?;
        if events.is_empty() {
            return Ok(WriteOutcome::NoEvents);
        }

        let records: Vec<NormalizedRecord> = events.into_iter().map(normalize).collect();
        let writer = self.writer.clone();
        let id = object_id.to_string();
        let outcome = tokio::task::spawn_blocking(move || {
            writer.write(&records, endpoint.as_str(), &id)
        })
        .await
        .map_err(|join_err| {
            WriteError::new(
                self.writer.table_path(endpoint.as_str(), object_id),
                std::io::Error::other(join_err.to_string()),
            )
        })??;
        Ok(outcome)
    }
}
