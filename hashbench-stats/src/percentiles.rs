//! Percentile Computation
//!
//! Computes percentiles from raw samples. Tail percentiles (p95, p99) keep
//! every sample: slow operations are exactly what a probe-strategy comparison
//! is looking for.

/// Compute a single percentile from samples
///
/// Uses linear interpolation between nearest ranks.
///
/// # Examples
///
/// ```ignore
/// # use hashbench_stats::compute_percentile;
/// let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let p50 = compute_percentile(&samples, 50.0);  // Median
/// let p95 = compute_percentile(&samples, 95.0);  // 95th percentile
/// println!("Median: {}", p50);
/// println!("P95: {}", p95);
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    percentile_of_sorted(&sorted, percentile)
}

/// Percentile of an already ascending slice
pub(crate) fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    if sorted.len() == 1 {
        return sorted[0];
    }

    let n = sorted.len();
    let p = (percentile / 100.0).clamp(0.0, 1.0);

    // Linear interpolation between nearest ranks
    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        let samples = vec![5.0, 1.0, 4.0, 2.0, 3.0];
        let p50 = compute_percentile(&samples, 50.0);
        assert!((p50 - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_quartiles_match_linear_interpolation() {
        let samples: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        // rank = 0.25 * 99 = 24.75 -> 25 + 0.75
        assert!((compute_percentile(&samples, 25.0) - 25.75).abs() < 1e-9);
        assert!((compute_percentile(&samples, 75.0) - 75.25).abs() < 1e-9);
    }

    #[test]
    fn test_tail_percentiles() {
        let samples: Vec<f64> = (1..=1000).map(|x| x as f64).collect();
        // rank = 0.99 * 999 = 989.01
        let p99 = compute_percentile(&samples, 99.0);
        assert!((p99 - 990.01).abs() < 1e-9);
        let p95 = compute_percentile(&samples, 95.0);
        assert!((p95 - 950.05).abs() < 1e-9);
    }

    #[test]
    fn test_single_sample() {
        let samples = vec![42.0];
        let p50 = compute_percentile(&samples, 50.0);
        assert!((p50 - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_samples() {
        let samples: Vec<f64> = Vec::new();
        let p50 = compute_percentile(&samples, 50.0);
        assert!((p50 - 0.0).abs() < f64::EPSILON);
    }
}
