//! Timing Tables
//!
//! A `RunResult` is the in-memory form of one run's CSV artifact after
//! normalization to the canonical `(Index, Time)` column pair.

use crate::cumulative::CumulativeSeries;
use serde::{Deserialize, Serialize};

/// Canonical name of the first column
pub const INDEX_COLUMN: &str = "Index";
/// Canonical name of the second column
pub const TIME_COLUMN: &str = "Time";

/// One timed operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    /// Operation index
    pub index: i64,
    /// Elapsed time in seconds
    pub time: f64,
}

impl TimingPoint {
    /// Create a new timing point
    pub fn new(index: i64, time: f64) -> Self {
        Self { index, time }
    }
}

/// Timing table for a single run
///
/// Pairs are kept in artifact order. Consumers that need index order must
/// sort their own copy (see [`crate::cumulative_sum`]).
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    label: String,
    points: Vec<TimingPoint>,
}

impl RunResult {
    /// Create a run from its label and pairs
    pub fn new(label: impl Into<String>, points: Vec<TimingPoint>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    /// Label derived from the artifact file name
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Column names, always `["Index", "Time"]`
    pub fn columns(&self) -> [&'static str; 2] {
        [INDEX_COLUMN, TIME_COLUMN]
    }

    /// Pairs in artifact order
    pub fn points(&self) -> &[TimingPoint] {
        &self.points
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the table has no pairs
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Raw time values in artifact order
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time).collect()
    }

    /// Cumulative time series computed over a private copy of the pairs
    pub fn cumulative(&self) -> CumulativeSeries {
        CumulativeSeries::from_run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_canonical() {
        let run = RunResult::new("r", vec![TimingPoint::new(1, 0.5)]);
        assert_eq!(run.columns(), ["Index", "Time"]);
    }

    #[test]
    fn test_times_preserve_artifact_order() {
        let run = RunResult::new(
            "r",
            vec![
                TimingPoint::new(3, 0.3),
                TimingPoint::new(1, 0.1),
                TimingPoint::new(2, 0.2),
            ],
        );
        assert_eq!(run.times(), vec![0.3, 0.1, 0.2]);
        assert_eq!(run.len(), 3);
        assert!(!run.is_empty());
    }
}
