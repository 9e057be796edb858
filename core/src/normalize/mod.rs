mod flatten;
mod record;

pub use flatten::{normalize, PROMOTED_FIELDS};
pub use record::{canonical_json, CellValue, NormalizedRecord};
