use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::WriteError;
use crate::normalize::NormalizedRecord;

pub const DEFAULT_TABLE_EXTENSION: &str = "csv";

/// Result of persisting one object's records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(WrittenTable),
    /// Nothing to write; no file is created.
    NoEvents,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTable {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: Vec<String>,
}

/// Writes one CSV table per object under `<root>/<container>/<object_id>.<ext>`.
#[derive(Debug, Clone)]
pub struct TableWriter {
    root: PathBuf,
    extension: String,
}

impl TableWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_TABLE_EXTENSION.to_string(),
        }
    }

    pub fn table_path(&self, container: &str, object_id: &str) -> PathBuf {
        self.root
            .join(safe_file_stem(container))
            .join(format!("{}.{}", safe_file_stem(object_id), self.extension))
    }

    /// Persist `records` as a single table, replacing any previous table for
    /// the same object. Rows are staged in a sibling `.partial` file and
    /// renamed into place, so readers never observe a half-written table.
    pub fn write(
        &self,
        records: &[NormalizedRecord],
        container: &str,
        object_id: &str,
    ) -> Result<WriteOutcome, WriteError> {
        if records.is_empty() {
            return Ok(WriteOutcome::NoEvents);
        }

        let path = self.table_path(container, object_id);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| WriteError::new(dir, e))?;
        }

        let columns = header(records);
        let staging = staging_path(&path);
        if let Err(err) = write_csv(&staging, &columns, records) {
            let _ = fs::remove_file(&staging);
            return Err(err);
        }
        fs::rename(&staging, &path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            WriteError::new(&path, e)
        })?;

        tracing::debug!(
            target: "evdump.table",
            path = %path.display(),
            rows = records.len(),
            columns = columns.len(),
            "table written"
        );

        Ok(WriteOutcome::Written(WrittenTable {
            path,
            rows: records.len(),
            columns,
        }))
    }
}

/// Sorted union of every field name across `records`.
pub fn header(records: &[NormalizedRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.keys())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn write_csv(
    path: &Path,
    columns: &[String],
    records: &[NormalizedRecord],
) -> Result<(), WriteError> {
    let to_write_err = |e: csv::Error| WriteError::new(path, e.into());

    let mut wtr = csv::Writer::from_path(path).map_err(to_write_err)?;
    // Records with no fields at all leave an empty table rather than `""` lines.
    if columns.is_empty() {
        return wtr.flush().map_err(|e| WriteError::new(path, e));
    }
    wtr.write_record(columns).map_err(to_write_err)?;
    for record in records {
        let row: Vec<Cow<'_, str>> = columns
            .iter()
            .map(|c| record.get(c).map(|v| v.render()).unwrap_or_default())
            .collect();
        wtr.write_record(row.iter().map(|cell| cell.as_bytes()))
            .map_err(to_write_err)?;
    }
    wtr.flush().map_err(|e| WriteError::new(path, e))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

/// Object ids come from the remote API; keep them from escaping the container
/// directory. Distinct ids always map to distinct stems: `%` and path
/// separators are percent-encoded, so `%2E` and a bare `%` only ever come
/// from the dot names and the empty id.
fn safe_file_stem(raw: &str) -> String {
    match raw {
        "" => return "%".to_string(),
        "." => return "%2E".to_string(),
        ".." => return "%2E%2E".to_string(),
        _ => {}
    }
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            '\\' => out.push_str("%5C"),
            '\0' => out.push_str("%00"),
            c => out.push(c),
        }
    }
    out
}
