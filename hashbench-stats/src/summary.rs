//! Descriptive Statistics
//!
//! The `describe` summary of a run's time column: count, mean, sample standard
//! deviation, min, median, 95th percentile, max, plus the 99th percentile.
//! Every value is computed from all samples; nothing is trimmed.

use crate::percentiles::percentile_of_sorted;

/// Summary of a run's time values
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DescriptiveStats {
    /// Number of samples
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (n - 1); 0 with fewer than two samples
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// 50th percentile
    pub median: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
    /// Largest sample
    pub max: f64,
}

/// Compute descriptive statistics over raw samples
///
/// Empty input yields all-zero statistics with `count == 0`.
pub fn describe(samples: &[f64]) -> DescriptiveStats {
    if samples.is_empty() {
        return DescriptiveStats::default();
    }

    let count = samples.len();
    let mean = samples.iter().sum::<f64>() / count as f64;

    let std_dev = if count < 2 {
        0.0
    } else {
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        variance.sqrt()
    };

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    DescriptiveStats {
        count,
        mean,
        std_dev,
        min: sorted[0],
        median: percentile_of_sorted(&sorted, 50.0),
        p95: percentile_of_sorted(&sorted, 95.0),
        p99: percentile_of_sorted(&sorted, 99.0),
        max: sorted[count - 1],
    }
}

impl DescriptiveStats {
    /// Total time across all samples
    pub fn total(&self) -> f64 {
        self.mean * self.count as f64
    }

    /// Operations per second implied by the mean
    pub fn throughput(&self) -> Option<f64> {
        if self.mean > 0.0 {
            Some(1.0 / self.mean)
        } else {
            None
        }
    }
}
