#![warn(missing_docs)]
//! hashbench Plot - Visualizations
//!
//! Three figures per sweep:
//! - `{label}_cumulative`: cumulative time against operation index
//! - `{label}_distribution`: histogram with density overlay, and a box plot
//! - `all_cumulative`: every ingested run on one chart, one legend entry each
//!
//! Figures are drawn as SVG and rasterized to PNG unless SVG output is
//! requested.

mod error;
mod raster;
mod renderer;
mod settings;

pub use error::RenderError;
pub use renderer::PlotRenderer;
pub use settings::{ImageFormat, Theme, VisualSettings};

use hashbench_core::CumulativeSeries;
use std::path::{Path, PathBuf};

/// File stem of the combined plot
pub const COMBINED_PLOT_STEM: &str = "all_cumulative";

/// A figure written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPlot {
    /// Where the image was written
    pub path: PathBuf,
    /// Cumulative curves drawn, in legend order (empty for distribution plots)
    pub curves: Vec<CumulativeSeries>,
}

/// `{plots_dir}/{label}_cumulative.{ext}`
pub fn cumulative_path(plots_dir: &Path, label: &str, format: ImageFormat) -> PathBuf {
    plots_dir.join(format!("{}_cumulative.{}", label, format.extension()))
}

/// `{plots_dir}/{label}_distribution.{ext}`
pub fn distribution_path(plots_dir: &Path, label: &str, format: ImageFormat) -> PathBuf {
    plots_dir.join(format!("{}_distribution.{}", label, format.extension()))
}

/// `{plots_dir}/all_cumulative.{ext}`
pub fn combined_path(plots_dir: &Path, format: ImageFormat) -> PathBuf {
    plots_dir.join(format!("{}.{}", COMBINED_PLOT_STEM, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbench_core::{RunResult, TimingPoint};
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use tempfile::tempdir;

    fn random_run(label: &str, n: i64, seed: u64) -> RunResult {
        let mut rng = StdRng::seed_from_u64(seed);
        RunResult::new(
            label,
            (1..=n)
                .map(|i| TimingPoint::new(i, rng.gen_range(1e-7..5e-6)))
                .collect(),
        )
    }

    fn svg_renderer() -> PlotRenderer {
        PlotRenderer::new(VisualSettings {
            format: ImageFormat::Svg,
            ..VisualSettings::default()
        })
    }

    #[test]
    fn test_paths() {
        let dir = Path::new("plots");
        assert_eq!(
            cumulative_path(dir, "a", ImageFormat::Png),
            PathBuf::from("plots/a_cumulative.png")
        );
        assert_eq!(
            distribution_path(dir, "a", ImageFormat::Svg),
            PathBuf::from("plots/a_distribution.svg")
        );
        assert_eq!(
            combined_path(dir, ImageFormat::Png),
            PathBuf::from("plots/all_cumulative.png")
        );
    }

    #[test]
    fn test_single_run_figures_written_as_svg() {
        let dir = tempdir().unwrap();
        let plots = dir.path().join("nested").join("plots");
        let run = random_run("insert_linear_djb2_0.75", 500, 1);
        let renderer = svg_renderer();

        let cumulative = renderer
            .render_cumulative(&run, &cumulative_path(&plots, run.label(), ImageFormat::Svg))
            .unwrap();
        let distribution = renderer
            .render_distribution(&run, &distribution_path(&plots, run.label(), ImageFormat::Svg))
            .unwrap();

        let svg = std::fs::read_to_string(&cumulative.path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("insert_linear_djb2_0.75 - Cumulative"));
        assert_eq!(cumulative.curves.len(), 1);
        assert_eq!(cumulative.curves[0].len(), 500);

        let svg = std::fs::read_to_string(&distribution.path).unwrap();
        assert!(svg.contains("(Histogram)"));
        assert!(svg.contains("(Box Plot)"));
    }

    #[test]
    fn test_png_output() {
        let dir = tempdir().unwrap();
        let run = random_run("lookup_quadratic_fnv1a_0.5", 200, 2);
        let renderer = PlotRenderer::new(VisualSettings {
            width: 320,
            height: 240,
            ..VisualSettings::default()
        });

        let path = dir.path().join("cumulative.png");
        renderer.render_cumulative(&run, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_combined_has_one_curve_per_run() {
        let dir = tempdir().unwrap();
        let runs = vec![
            random_run("a", 300, 3),
            random_run("b", 200, 4),
            random_run("c", 100, 5),
        ];
        let renderer = svg_renderer();

        let combined = renderer
            .render_combined(&runs, &combined_path(dir.path(), ImageFormat::Svg))
            .unwrap();

        let labels: Vec<&str> = combined.curves.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
        let svg = std::fs::read_to_string(&combined.path).unwrap();
        assert!(svg.contains("All Benchmarks (Cumulative)"));
    }

    #[test]
    fn test_single_and_combined_series_are_identical() {
        let dir = tempdir().unwrap();
        let mut points: Vec<TimingPoint> = (1..=50)
            .rev()
            .map(|i| TimingPoint::new(i, i as f64 * 1e-6))
            .collect();
        points.push(TimingPoint::new(25, 3e-6));
        let run = RunResult::new("shuffled", points);
        let before = run.clone();
        let renderer = svg_renderer();

        let single = renderer
            .render_cumulative(&run, &dir.path().join("single.svg"))
            .unwrap();
        let combined = renderer
            .render_combined(std::slice::from_ref(&run), &dir.path().join("all.svg"))
            .unwrap();
        let again = renderer
            .render_cumulative(&run, &dir.path().join("again.svg"))
            .unwrap();

        assert_eq!(single.curves[0], combined.curves[0]);
        assert_eq!(single.curves[0], again.curves[0]);
        assert_eq!(run, before);
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        let dir = tempdir().unwrap();
        let renderer = svg_renderer();
        let empty = RunResult::new("empty", Vec::new());

        assert!(matches!(
            renderer.render_cumulative(&empty, &dir.path().join("e.svg")),
            Err(RenderError::EmptySeries(_))
        ));
        assert!(matches!(
            renderer.render_distribution(&empty, &dir.path().join("d.svg")),
            Err(RenderError::EmptySeries(_))
        ));
        assert!(matches!(
            renderer.render_combined(&[], &dir.path().join("all.svg")),
            Err(RenderError::EmptySeries(_))
        ));
        assert!(!dir.path().join("e.svg").exists());
    }

    #[test]
    fn test_constant_times_still_render() {
        let dir = tempdir().unwrap();
        let run = RunResult::new(
            "flat",
            (1..=10).map(|i| TimingPoint::new(i, 1e-6)).collect(),
        );
        svg_renderer()
            .render_distribution(&run, &dir.path().join("flat.svg"))
            .unwrap();
    }
}
