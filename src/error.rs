use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned by every pipeline stage.
///
/// A single enum is shared by ingestion, cleaning, encoding, joining and writing so that
/// [`crate::pipeline::run_pipeline`] can act as the one failure boundary for a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required input file does not exist. Checked before any parsing happens.
    #[error("input file does not exist: {}", path.display())]
    MissingInputFile { path: PathBuf },

    /// Underlying I/O error (e.g. permission denied, disk full).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A table does not have the expected shape (wrong width, duplicate column names, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A record could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A column referenced by a transform is not present in the table.
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// Mode imputation was requested for a column without any non-missing value.
    #[error("cannot compute modal value: column '{column}' has no non-missing values")]
    NoModalValue { column: String },

    /// A stage produced a table with zero rows.
    #[error("{stage} produced no rows")]
    EmptyResult { stage: String },
}
