use serde_json::Value;

use crate::source::Event;

use super::record::{CellValue, NormalizedRecord};

/// Sub-fields lifted out of a mapping-valued `input` onto the record itself.
pub const PROMOTED_FIELDS: [&str; 4] = ["input", "output", "expected", "metadata"];

/// Flatten one raw event into a tabular record.
///
/// When `input` holds a mapping, its `input`, `output`, `expected` and
/// `metadata` entries replace the event's own fields of the same names (absent
/// entries become null). Promotion happens once: promoted values that are
/// themselves nested are serialized, not expanded again. Every remaining
/// mapping or sequence is serialized to canonical JSON; scalars pass through.
pub fn normalize(mut event: Event) -> NormalizedRecord {
    if matches!(event.get("input"), Some(Value::Object(_))) {
        if let Some(Value::Object(mut nested)) = event.remove("input") {
            for field in PROMOTED_FIELDS {
                let value = nested.remove(field).unwrap_or(Value::Null);
                event.insert(field.to_string(), value);
            }
        }
    }

    event
        .into_iter()
        .map(|(key, value)| (key, CellValue::from_json(value)))
        .collect()
}
