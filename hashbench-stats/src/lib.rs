#![warn(missing_docs)]
//! hashbench Statistical Engine
//!
//! Summaries over a run's raw time values:
//! - Descriptive statistics (count, mean, stddev, min, median, p95, p99, max)
//! - Percentiles by linear interpolation between closest ranks
//! - IQR fences and box-plot summaries (whiskers and fliers)
//! - Fixed-bin histograms and Gaussian kernel density estimates

mod density;
mod outliers;
mod percentiles;
mod summary;

pub use density::{Histogram, HistogramBin, gaussian_kde, histogram, scott_bandwidth};
pub use outliers::{BoxSummary, OutlierAnalysis, box_summary, detect_outliers};
pub use percentiles::compute_percentile;
pub use summary::{DescriptiveStats, describe};

/// Default number of histogram bins
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// Whisker reach in multiples of the interquartile range
pub const DEFAULT_WHISKER_IQR: f64 = 1.5;

/// Number of grid points a density curve is evaluated at
pub const DEFAULT_KDE_POINTS: usize = 200;
