use crate::error::ExportError;
use crate::source::EndpointKind;
use crate::table::WrittenTable;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub object_page_size: usize,
    pub event_page_size: usize,
    /// Objects exported concurrently; 1 processes them one after another.
    pub max_parallel: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            object_page_size: 10,
            event_page_size: 100,
            max_parallel: 1,
        }
    }
}

impl From<&crate::config::ExportConfig> for ExportOptions {
    fn from(cfg: &crate::config::ExportConfig) -> Self {
        Self {
            object_page_size: cfg.object_page_size,
            event_page_size: cfg.event_page_size,
            max_parallel: cfg.max_parallel,
        }
    }
}

/// What happened to one object during a run.
#[derive(Debug)]
pub enum ObjectOutcome {
    Written(WrittenTable),
    NoEvents,
    Failed(ExportError),
    /// Not started because the run was cancelled.
    Skipped,
}

impl ObjectOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Written(_) => "written",
            Self::NoEvents => "no_events",
            Self::Failed(_) => "failed",
            Self::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedObject {
    pub id: String,
    pub error: String,
}

/// Per-endpoint tally. Id lists keep listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub endpoint: EndpointKind,
    pub listed: usize,
    pub written: Vec<String>,
    pub no_events: Vec<String>,
    pub failed: Vec<FailedObject>,
    pub skipped: Vec<String>,
}

impl RunSummary {
    pub fn new(endpoint: EndpointKind) -> Self {
        Self {
            endpoint,
            listed: 0,
            written: Vec::new(),
            no_events: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn record(&mut self, object_id: &str, outcome: &ObjectOutcome) {
        let id = object_id.to_string();
        match outcome {
            ObjectOutcome::Written(_) => self.written.push(id),
            ObjectOutcome::NoEvents => self.no_events.push(id),
            ObjectOutcome::Failed(err) => self.failed.push(FailedObject {
                id,
                error: err.to_string(),
            }),
            ObjectOutcome::Skipped => self.skipped.push(id),
        }
    }

    /// Objects whose export was attempted, whatever the result.
    pub fn processed(&self) -> usize {
        self.written.len() + self.no_events.len() + self.failed.len()
    }

    pub fn failed_ids(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.id.as_str()).collect()
    }

    pub fn was_cancelled(&self) -> bool {
        !self.skipped.is_empty()
    }
}
