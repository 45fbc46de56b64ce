use std::path::PathBuf;
use thiserror::Error;

/// Why an artifact could not be turned into a run
#[derive(Debug, Error)]
pub enum IngestError {
    /// Artifact does not exist
    #[error("artifact not found: {0}")]
    NotFound(PathBuf),

    /// Artifact exists but could not be opened
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV (ragged rows, invalid UTF-8, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Fewer than two columns
    #[error("expected at least 2 columns, found {found}")]
    TooFewColumns {
        /// Columns in the first record
        found: usize,
    },

    /// First column is not an integer
    #[error("line {line}: invalid index {value:?}")]
    InvalidIndex {
        /// 1-based line in the artifact
        line: u64,
        /// Offending field
        value: String,
    },

    /// Second column is not a finite number
    #[error("line {line}: invalid time {value:?}")]
    InvalidTime {
        /// 1-based line in the artifact
        line: u64,
        /// Offending field
        value: String,
    },

    /// Header present but no data rows
    #[error("artifact has no data rows")]
    NoRows,
}

impl IngestError {
    /// Short tag used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::NotFound(_) => "not_found",
            IngestError::Io(_) => "io",
            IngestError::Csv(_) => "csv",
            IngestError::TooFewColumns { .. } => "too_few_columns",
            IngestError::InvalidIndex { .. } => "invalid_index",
            IngestError::InvalidTime { .. } => "invalid_time",
            IngestError::NoRows => "no_rows",
        }
    }
}
