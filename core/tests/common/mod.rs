use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use evdump_core::api::{
    ApiObject, EndpointKind, Event, EventPage, ExportReporter, ExportSource, FetchPageRequest,
    ListPageRequest, ObjectOutcome, ObjectPage, RunSummary, TransportError,
};
use serde_json::Value;

/// In-memory stand-in for the remote API.
///
/// Objects are listed with `starting_after` semantics; each object's events
/// are split into pages of the requested limit with cursors `"<id>:<offset>"`.
#[derive(Default)]
pub struct MemoryApi {
    objects: HashMap<EndpointKind, Vec<String>>,
    events: HashMap<(EndpointKind, String), Vec<Event>>,
    failing: Vec<String>,
    pub fetch_log: Mutex<Vec<(String, Option<String>)>>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(mut self, endpoint: EndpointKind, id: &str, events: Vec<Value>) -> Self {
        self.objects
            .entry(endpoint)
            .or_default()
            .push(id.to_string());
        self.events.insert(
            (endpoint, id.to_string()),
            events
                .into_iter()
                .map(|v| v.as_object().cloned().expect("event must be an object"))
                .collect(),
        );
        self
    }

    pub fn failing(mut self, id: &str) -> Self {
        self.failing.push(id.to_string());
        self
    }
}

#[async_trait]
impl ExportSource for MemoryApi {
    async fn list_page(&self, req: ListPageRequest<'_>) -> Result<ObjectPage, TransportError> {
        let ids = self.objects.get(&req.endpoint).cloned().unwrap_or_default();
        let start = req
            .starting_after
            .and_then(|after| ids.iter().position(|id| id == after))
            .map(|pos| pos + 1)
            .unwrap_or(0);
        Ok(ObjectPage {
            objects: ids[start..]
                .iter()
                .take(req.limit)
                .map(|id| ApiObject::new(id.clone()))
                .collect(),
        })
    }

    async fn fetch_page(&self, req: FetchPageRequest<'_>) -> Result<EventPage, TransportError> {
        self.fetch_log
            .lock()
            .unwrap()
            .push((req.object_id.to_string(), req.cursor.map(str::to_string)));

        if self.failing.iter().any(|id| id == req.object_id) {
            return Err(TransportError::status_error(
                503,
                format!("memory://{}/{}/fetch", req.endpoint, req.object_id),
                "service unavailable",
            ));
        }

        let all = self
            .events
            .get(&(req.endpoint, req.object_id.to_string()))
            .cloned()
            .unwrap_or_default();
        let offset = req
            .cursor
            .and_then(|c| c.rsplit_once(':'))
            .and_then(|(_, n)| n.parse::<usize>().ok())
            .unwrap_or(0);
        let end = (offset + req.limit).min(all.len());
        let cursor = (end < all.len()).then(|| format!("{}:{}", req.object_id, end));
        Ok(EventPage {
            events: all[offset..end].to_vec(),
            cursor,
        })
    }
}

/// Records every hook call as a short string.
#[derive(Default)]
pub struct RecordingReporter {
    pub lines: Mutex<Vec<String>>,
}

impl ExportReporter for RecordingReporter {
    fn listing_complete(&self, endpoint: EndpointKind, objects: usize) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("listed {endpoint} {objects}"));
    }

    fn object_finished(&self, endpoint: EndpointKind, object_id: &str, outcome: &ObjectOutcome) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{endpoint}/{object_id} {}", outcome.label()));
    }

    fn run_complete(&self, summary: &RunSummary) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("done {} {}", summary.endpoint, summary.processed()));
    }
}
