//! Artifact Reader

use crate::{IngestError, MIN_COLUMNS};
use hashbench_core::{RunResult, TimingPoint, label_for_path};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Ingest an artifact, logging and discarding any failure
///
/// The run label is the artifact's file name without its `.csv` suffix.
pub fn ingest_csv(path: &Path) -> Option<RunResult> {
    match try_ingest_csv(path) {
        Ok(run) => {
            tracing::debug!(path = %path.display(), rows = run.len(), "ingested artifact");
            Some(run)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable artifact");
            None
        }
    }
}

/// Ingest an artifact, returning why it could not be read
pub fn try_ingest_csv(path: &Path) -> Result<RunResult, IngestError> {
    if !path.exists() {
        return Err(IngestError::NotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    read_run(label_for_path(path), file)
}

/// Parse an `(index, time)` table from any reader
pub fn read_run<R: Read>(label: impl Into<String>, reader: R) -> Result<RunResult, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = rdr.records();
    let first = match records.next() {
        Some(record) => record?,
        None => return Err(IngestError::TooFewColumns { found: 0 }),
    };
    if first.len() < MIN_COLUMNS {
        return Err(IngestError::TooFewColumns { found: first.len() });
    }

    let mut points = Vec::new();
    if is_data_row(&first) {
        points.push(parse_record(&first)?);
    }

    for record in records {
        points.push(parse_record(&record?)?);
    }

    if points.is_empty() {
        return Err(IngestError::NoRows);
    }

    Ok(RunResult::new(label, points))
}

fn parse_record(record: &csv::StringRecord) -> Result<TimingPoint, IngestError> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let raw_index = record.get(0).unwrap_or_default();
    let raw_time = record.get(1).unwrap_or_default();

    let index = parse_index(raw_index).ok_or_else(|| IngestError::InvalidIndex {
        line,
        value: raw_index.to_string(),
    })?;
    let time = raw_time
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| IngestError::InvalidTime {
            line,
            value: raw_time.to_string(),
        })?;

    Ok(TimingPoint::new(index, time))
}

/// A first record whose two leading fields are numbers is data, not a header
fn is_data_row(record: &csv::StringRecord) -> bool {
    let numeric = |i: usize| record.get(i).is_some_and(|f| f.parse::<f64>().is_ok());
    numeric(0) && numeric(1)
}

/// Integers, or reals with no fractional part (`3.0`)
fn parse_index(field: &str) -> Option<i64> {
    if let Ok(i) = field.parse::<i64>() {
        return Some(i);
    }
    let f = field.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn parse(text: &str) -> Result<RunResult, IngestError> {
        read_run("run", text.as_bytes())
    }

    #[test]
    fn test_header_is_replaced_by_canonical_names() {
        let run = parse("op,elapsed_seconds\n1,0.5\n2,0.25\n").unwrap();
        assert_eq!(run.columns(), ["Index", "Time"]);
        assert_eq!(
            run.points(),
            &[TimingPoint::new(1, 0.5), TimingPoint::new(2, 0.25)]
        );
    }

    #[test]
    fn test_headerless_artifact() {
        let run = parse("1,0.000000100\n2,0.000000200\n").unwrap();
        assert_eq!(run.len(), 2);
        assert_eq!(run.points()[0].index, 1);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let run = parse("Index,Time,Note\n1,0.1,warm\n2,0.2,hot\n").unwrap();
        assert_eq!(run.times(), vec![0.1, 0.2]);
    }

    #[test]
    fn test_integral_real_index() {
        let run = parse("Index,Time\n3.0,0.1\n").unwrap();
        assert_eq!(run.points()[0].index, 3);
        assert!(matches!(
            parse("Index,Time\n3.5,0.1\n"),
            Err(IngestError::InvalidIndex { line: 2, .. })
        ));
    }

    #[test]
    fn test_single_column_rejected() {
        assert!(matches!(
            parse("Time\n0.1\n0.2\n"),
            Err(IngestError::TooFewColumns { found: 1 })
        ));
        assert!(matches!(
            parse(""),
            Err(IngestError::TooFewColumns { found: 0 })
        ));
    }

    #[test]
    fn test_header_only_has_no_rows() {
        assert!(matches!(parse("Index,Time\n"), Err(IngestError::NoRows)));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            parse("Index,Time\n1,fast\n"),
            Err(IngestError::InvalidTime { .. })
        ));
        assert!(matches!(
            parse("Index,Time\n1,NaN\n"),
            Err(IngestError::InvalidTime { .. })
        ));
        assert!(matches!(
            parse("Index,Time\n1,0.1\n2,0.2,extra\n"),
            Err(IngestError::Csv(_))
        ));
    }

    #[test]
    fn test_nonexistent_path_yields_none() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        assert!(ingest_csv(&missing).is_none());
        assert!(matches!(
            try_ingest_csv(&missing),
            Err(IngestError::NotFound(_))
        ));
    }

    #[test]
    fn test_narrow_file_yields_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("narrow.csv");
        fs::write(&path, "Time\n0.1\n").unwrap();
        assert!(ingest_csv(&path).is_none());
    }

    #[test]
    fn test_label_from_file_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("insert_linear_djb2_0.75.csv");
        fs::write(&path, "Index,Time\n1,0.001\n").unwrap();

        let run = ingest_csv(&path).unwrap();
        assert_eq!(run.label(), "insert_linear_djb2_0.75");
        assert_eq!(run.len(), 1);
    }
}
