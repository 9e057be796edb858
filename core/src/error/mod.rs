#[allow(clippy::module_inception)]
pub mod error;
pub mod transport;

pub use error::{CliError, ExportError, WriteError};
pub use transport::{preview_body, TransportError, TransportErrorKind};
