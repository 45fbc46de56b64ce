#![warn(missing_docs)]
//! hashbench Ingest - CSV Artifacts
//!
//! Reads the timing table a benchmark run leaves behind and normalizes it to
//! the canonical `(Index, Time)` pair:
//! - the first two columns are used, whatever their header text says
//! - artifacts without a header row are accepted
//! - extra columns are ignored
//!
//! [`ingest_csv`] never fails loudly: an unreadable artifact is logged and
//! yields `None`. [`try_ingest_csv`] returns the typed [`IngestError`] for
//! callers that record why a run was skipped.

mod error;
mod reader;

pub use error::IngestError;
pub use reader::{ingest_csv, read_run, try_ingest_csv};

/// Minimum number of columns an artifact must carry
pub const MIN_COLUMNS: usize = 2;
