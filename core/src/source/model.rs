use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw event as returned by the fetch endpoint. Shape is not interpreted
/// beyond what normalization needs.
pub type Event = Map<String, Value>;

/// Kind of top-level container exported. Doubles as the remote path segment
/// and the output directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
    Experiment,
    Dataset,
}

impl EndpointKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Experiment => "experiment",
            Self::Dataset => "dataset",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "experiment" | "experiments" => Ok(Self::Experiment),
            "dataset" | "datasets" => Ok(Self::Dataset),
            other => Err(format!(
                "unknown endpoint kind '{other}' (expected experiment or dataset)"
            )),
        }
    }
}

/// Selects which project's objects are listed. Exactly one selector exists by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFilter {
    Id(String),
    Name(String),
}

impl ProjectFilter {
    pub fn query_pair(&self) -> (&'static str, &str) {
        match self {
            Self::Id(id) => ("project_id", id),
            Self::Name(name) => ("project_name", name),
        }
    }
}

impl fmt::Display for ProjectFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (key, value) = self.query_pair();
        write!(f, "{key}={value}")
    }
}

/// Experiment or dataset. Only `id` is interpreted; everything else is carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiObject {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ApiObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }
}

/// Response body of `GET /v1/{endpoint}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectPage {
    #[serde(default)]
    pub objects: Vec<ApiObject>,
}

/// Response body of `GET /v1/{endpoint}/{id}/fetch`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPage {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub cursor: Option<String>,
}

impl EventPage {
    /// The continuation token, if the server signalled that more pages remain.
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }
}
