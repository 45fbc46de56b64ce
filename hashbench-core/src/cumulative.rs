//! Cumulative Time Transform
//!
//! Orders a run's pairs by operation index (stable on ties) and accumulates
//! elapsed time. The transform reads the source slice and writes only into
//! its own buffer; the source is never reordered or modified.

use crate::run::{RunResult, TimingPoint};
use serde::{Deserialize, Serialize};

/// Running sum of elapsed time, ordered by operation index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSeries {
    /// Label of the run this series was computed from
    pub label: String,
    /// `(index, cumulative time)` pairs in ascending index order
    pub points: Vec<(i64, f64)>,
}

impl CumulativeSeries {
    /// Compute the series for a run
    pub fn from_run(run: &RunResult) -> Self {
        Self {
            label: run.label().to_string(),
            points: cumulative_sum(run.points()),
        }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total elapsed time (last cumulative value)
    pub fn total(&self) -> f64 {
        self.points.last().map(|&(_, t)| t).unwrap_or(0.0)
    }

    /// Smallest and largest index, if any
    pub fn index_range(&self) -> Option<(i64, i64)> {
        match (self.points.first(), self.points.last()) {
            (Some(&(lo, _)), Some(&(hi, _))) => Some((lo, hi)),
            _ => None,
        }
    }

    /// Smallest and largest cumulative value, if any
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, &(_, v)| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Stable-sort a copy of `points` by index and return the running sum of time.
pub fn cumulative_sum(points: &[TimingPoint]) -> Vec<(i64, f64)> {
    let mut ordered = points.to_vec();
    // sort_by_key is stable: equal indices keep artifact order
    ordered.sort_by_key(|p| p.index);

    let mut total = 0.0;
    ordered
        .into_iter()
        .map(|p| {
            total += p.time;
            (p.index, total)
        })
        .collect()
}
