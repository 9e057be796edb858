use std::path::PathBuf;

use thiserror::Error;

use super::transport::TransportError;

/// Failure to materialize one object's table on disk.
#[derive(Error, Debug)]
#[error("write failed for {}: {source}", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl WriteError {
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// Per-object failure. Never escapes the object boundary of an export run.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("listing {endpoint} objects failed: {source}")]
    Listing {
        endpoint: &'static str,
        #[source]
        source: TransportError,
    },
    #[error("export interrupted")]
    Interrupted,
}
