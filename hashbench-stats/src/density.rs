//! Distribution Shape
//!
//! Fixed-bin histograms and Gaussian kernel density estimates over raw time
//! values. Bins span `[min, max]` with equal widths; the last bin is closed
//! on the right so the maximum sample is counted.

/// One histogram bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    /// Left edge (inclusive)
    pub lower: f64,
    /// Right edge (exclusive, except for the last bin)
    pub upper: f64,
    /// Samples falling in the bin
    pub count: usize,
}

/// Equal-width histogram
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bars in ascending order
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Width shared by every bin
    pub fn bin_width(&self) -> f64 {
        self.bins.first().map(|b| b.upper - b.lower).unwrap_or(0.0)
    }

    /// Tallest bar
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Number of samples counted
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Left edge of the first bin and right edge of the last
    pub fn range(&self) -> Option<(f64, f64)> {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => Some((first.lower, last.upper)),
            _ => None,
        }
    }
}

/// Bucket samples into `bins` equal-width bins over `[min, max]`
///
/// When every sample has the same value the range is widened to
/// `[value - 0.5, value + 0.5]`. A bin count of zero is treated as one.
pub fn histogram(samples: &[f64], bins: usize) -> Histogram {
    if samples.is_empty() {
        return Histogram { bins: Vec::new() };
    }

    let bins = bins.max(1);
    let (mut lo, mut hi) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &x in samples {
        let idx = ((x - lo) / width) as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    Histogram {
        bins: counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: lo + i as f64 * width,
                upper: if i + 1 == bins {
                    hi
                } else {
                    lo + (i + 1) as f64 * width
                },
                count,
            })
            .collect(),
    }
}

/// Scott's rule bandwidth: `stddev * n^(-1/5)`
///
/// `None` when there are fewer than two samples or no spread.
pub fn scott_bandwidth(samples: &[f64]) -> Option<f64> {
    let n = samples.len();
    if n < 2 {
        return None;
    }

    let mean = samples.iter().sum::<f64>() / n as f64;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std_dev = variance.sqrt();
    if std_dev <= 0.0 || !std_dev.is_finite() {
        return None;
    }

    Some(std_dev * (n as f64).powf(-0.2))
}

/// Gaussian kernel density over `[min, max]`, evaluated at `points` grid points
///
/// Returns `(x, density)` pairs; empty when the bandwidth is undefined.
pub fn gaussian_kde(samples: &[f64], points: usize) -> Vec<(f64, f64)> {
    let Some(bandwidth) = scott_bandwidth(samples) else {
        return Vec::new();
    };
    let points = points.max(2);

    let (lo, hi) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    let step = (hi - lo) / (points - 1) as f64;
    let norm = 1.0 / (samples.len() as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    (0..points)
        .map(|i| {
            let x = lo + i as f64 * step;
            let sum: f64 = samples
                .iter()
                .map(|&s| {
                    let z = (x - s) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            (x, sum * norm)
        })
        .collect()
}
