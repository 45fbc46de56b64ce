//! Outlier Detection and Box-Plot Summaries
//!
//! Uses the IQR (Interquartile Range) method: samples outside
//! `[Q1 - k*IQR, Q3 + k*IQR]` are outliers. Outliers are only flagged for
//! display as box-plot fliers; descriptive statistics keep every sample.

use crate::percentiles::percentile_of_sorted;

/// Result of outlier analysis
#[derive(Debug, Clone)]
pub struct OutlierAnalysis {
    /// Samples inside the fences, in input order
    pub cleaned_samples: Vec<f64>,
    /// Indices of outlier samples
    pub outlier_indices: Vec<usize>,
    /// Number of low outliers (below lower bound)
    pub low_outlier_count: usize,
    /// Number of high outliers (above upper bound)
    pub high_outlier_count: usize,
    /// First quartile
    pub q1: f64,
    /// Third quartile
    pub q3: f64,
    /// Lower bound used for detection
    pub lower_bound: f64,
    /// Upper bound used for detection
    pub upper_bound: f64,
}

impl OutlierAnalysis {
    /// Number of outliers
    pub fn outlier_count(&self) -> usize {
        self.outlier_indices.len()
    }
}

/// Detect outliers with IQR fences at `k` interquartile ranges
///
/// # Examples
///
/// ```ignore
/// # use hashbench_stats::detect_outliers;
/// let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
/// let analysis = detect_outliers(&samples, 1.5);
/// println!("Outliers found: {}", analysis.outlier_count());
/// ```
pub fn detect_outliers(samples: &[f64], k: f64) -> OutlierAnalysis {
    if samples.is_empty() {
        return OutlierAnalysis {
            cleaned_samples: Vec::new(),
            outlier_indices: Vec::new(),
            low_outlier_count: 0,
            high_outlier_count: 0,
            q1: 0.0,
            q3: 0.0,
            lower_bound: 0.0,
            upper_bound: 0.0,
        };
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile_of_sorted(&sorted, 25.0);
    let q3 = percentile_of_sorted(&sorted, 75.0);
    let iqr = q3 - q1;

    let lower_bound = q1 - k * iqr;
    let upper_bound = q3 + k * iqr;

    let mut outlier_indices = Vec::new();
    let mut low_count = 0;
    let mut high_count = 0;
    let mut cleaned = Vec::with_capacity(samples.len());

    for (i, &sample) in samples.iter().enumerate() {
        if sample < lower_bound {
            outlier_indices.push(i);
            low_count += 1;
        } else if sample > upper_bound {
            outlier_indices.push(i);
            high_count += 1;
        } else {
            cleaned.push(sample);
        }
    }

    OutlierAnalysis {
        cleaned_samples: cleaned,
        outlier_indices,
        low_outlier_count: low_count,
        high_outlier_count: high_count,
        q1,
        q3,
        lower_bound,
        upper_bound,
    }
}

/// Geometry of a box plot
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    /// First quartile (left edge of the box)
    pub q1: f64,
    /// Median line
    pub median: f64,
    /// Third quartile (right edge of the box)
    pub q3: f64,
    /// Smallest sample inside the lower fence
    pub whisker_low: f64,
    /// Largest sample inside the upper fence
    pub whisker_high: f64,
    /// Samples beyond the whiskers, in input order
    pub fliers: Vec<f64>,
}

impl BoxSummary {
    /// Smallest and largest value the plot must show
    pub fn extent(&self) -> (f64, f64) {
        self.fliers.iter().fold(
            (self.whisker_low, self.whisker_high),
            |(lo, hi), &f| (lo.min(f), hi.max(f)),
        )
    }
}

/// Box-plot summary with whiskers reaching `whisker_iqr` interquartile ranges
///
/// Returns `None` for empty input.
pub fn box_summary(samples: &[f64], whisker_iqr: f64) -> Option<BoxSummary> {
    if samples.is_empty() {
        return None;
    }

    let analysis = detect_outliers(samples, whisker_iqr);
    let median = {
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        percentile_of_sorted(&sorted, 50.0)
    };

    let whisker_low = analysis
        .cleaned_samples
        .iter()
        .cloned()
        .fold(median, f64::min);
    let whisker_high = analysis
        .cleaned_samples
        .iter()
        .cloned()
        .fold(median, f64::max);

    let fliers = analysis
        .outlier_indices
        .iter()
        .map(|&i| samples[i])
        .collect();

    Some(BoxSummary {
        q1: analysis.q1,
        median,
        q3: analysis.q3,
        whisker_low,
        whisker_high,
        fliers,
    })
}
