//! CSV output.

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::PipelineResult;
use crate::types::DataSet;

/// Write `dataset` to `path` as comma-separated UTF-8 with a header row and no index column.
///
/// Nulls are written as empty fields and values are quoted only when necessary. The data goes
/// to a temporary file next to `path` which is renamed over `path` once fully written and
/// synced, so `path` either holds the complete table or is left as it was. Returns the size
/// of the written file in bytes.
pub fn write_csv(dataset: &DataSet, path: impl AsRef<Path>) -> PipelineResult<u64> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut wtr = csv::Writer::from_writer(tmp.as_file_mut());
        wtr.write_record(dataset.schema.field_names())?;
        for row in &dataset.rows {
            wtr.write_record(row.iter().map(|v| v.to_string()))?;
        }
        wtr.flush()?;
    }
    tmp.as_file().sync_all()?;
    debug!(tmp = %tmp.path().display(), "csv fully written");

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(fs::metadata(path)?.len())
}
