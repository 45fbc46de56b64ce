//! Plot Renderer
//!
//! Every figure is drawn into an in-memory SVG document with plotters, then
//! either written as-is or rasterized to PNG. The cumulative series drawn for
//! a run is always computed fresh from the run's immutable pairs, so a run
//! rendered alone and inside the combined plot produces the same curve.

use crate::raster::Rasterizer;
use crate::settings::{Colors, ImageFormat, VisualSettings};
use crate::{RenderError, RenderedPlot};
use hashbench_core::{CumulativeSeries, RunResult};
use hashbench_stats::{
    DEFAULT_KDE_POINTS, DEFAULT_WHISKER_IQR, box_summary, gaussian_kde, histogram,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::Path;

const FONT: &str = "sans-serif";
const COMBINED_TITLE: &str = "All Benchmarks (Cumulative)";

/// Renders cumulative, distribution and combined figures
pub struct PlotRenderer {
    settings: VisualSettings,
    colors: Colors,
    rasterizer: Option<Rasterizer>,
}

impl PlotRenderer {
    /// Create a renderer; PNG output loads system fonts once here
    pub fn new(settings: VisualSettings) -> Self {
        let rasterizer = match settings.format {
            ImageFormat::Png => Some(Rasterizer::new()),
            ImageFormat::Svg => None,
        };
        Self {
            colors: settings.theme.colors(),
            settings,
            rasterizer,
        }
    }

    /// Settings this renderer draws with
    pub fn settings(&self) -> &VisualSettings {
        &self.settings
    }

    /// Line plot of cumulative time against operation index for one run
    pub fn render_cumulative(
        &self,
        run: &RunResult,
        path: &Path,
    ) -> Result<RenderedPlot, RenderError> {
        let series = run.cumulative();
        if series.is_empty() {
            return Err(RenderError::EmptySeries(run.label().to_string()));
        }

        let title = format!("{} - Cumulative", run.label());
        let svg = self.draw_svg(|root| {
            self.draw_cumulative_chart(root, &title, std::slice::from_ref(&series), false)
        })?;
        self.persist(&svg, path)?;

        Ok(RenderedPlot {
            path: path.to_path_buf(),
            curves: vec![series],
        })
    }

    /// Histogram with density overlay next to a box plot of a run's raw times
    pub fn render_distribution(
        &self,
        run: &RunResult,
        path: &Path,
    ) -> Result<RenderedPlot, RenderError> {
        let times = run.times();
        if times.is_empty() {
            return Err(RenderError::EmptySeries(run.label().to_string()));
        }

        let title_prefix = format!("{} - Time Distribution", run.label());
        let svg = self.draw_svg(|root| {
            let panels = root.split_evenly((1, 2));
            self.draw_histogram(&panels[0], &title_prefix, &times)?;
            self.draw_box_plot(&panels[1], &title_prefix, &times)
        })?;
        self.persist(&svg, path)?;

        Ok(RenderedPlot {
            path: path.to_path_buf(),
            curves: Vec::new(),
        })
    }

    /// One labeled cumulative curve per run on a shared chart
    pub fn render_combined(
        &self,
        runs: &[RunResult],
        path: &Path,
    ) -> Result<RenderedPlot, RenderError> {
        let curves: Vec<CumulativeSeries> = runs
            .iter()
            .map(RunResult::cumulative)
            .filter(|s| !s.is_empty())
            .collect();
        if curves.is_empty() {
            return Err(RenderError::EmptySeries(COMBINED_TITLE.to_string()));
        }

        let svg = self.draw_svg(|root| self.draw_cumulative_chart(root, COMBINED_TITLE, &curves, true))?;
        self.persist(&svg, path)?;

        Ok(RenderedPlot {
            path: path.to_path_buf(),
            curves,
        })
    }

    fn draw_svg<F>(&self, draw: F) -> Result<String, RenderError>
    where
        F: for<'a> FnOnce(&DrawingArea<SVGBackend<'a>, Shift>) -> Result<(), RenderError>,
    {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.settings.width, self.settings.height))
                .into_drawing_area();
            root.fill(&self.colors.background)?;
            draw(&root)?;
            root.present()?;
        }
        Ok(svg)
    }

    fn persist(&self, svg: &str, path: &Path) -> Result<(), RenderError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RenderError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let bytes = match &self.rasterizer {
            Some(rasterizer) => rasterizer.png(svg)?,
            None => svg.as_bytes().to_vec(),
        };
        fs::write(path, bytes).map_err(|source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "wrote plot");
        Ok(())
    }

    fn draw_cumulative_chart(
        &self,
        area: &DrawingArea<SVGBackend<'_>, Shift>,
        title: &str,
        curves: &[CumulativeSeries],
        with_legend: bool,
    ) -> Result<(), RenderError> {
        let (x_lo, x_hi) = curves
            .iter()
            .filter_map(CumulativeSeries::index_range)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
                (lo.min(a as f64), hi.max(b as f64))
            });
        let (y_lo, y_hi) = curves
            .iter()
            .filter_map(CumulativeSeries::value_range)
            .fold((0.0f64, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
                (lo.min(a), hi.max(b))
            });
        let (x_lo, x_hi) = padded(x_lo, x_hi, 0.0);
        let (y_lo, y_hi) = padded(y_lo, y_hi, 0.05);

        let fg = self.colors.foreground;
        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, 28.0).into_font().color(&fg))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(90)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .x_desc("Operation Index")
            .y_desc("Cumulative Time (sec)")
            .axis_style(fg.stroke_width(1))
            .bold_line_style(self.colors.grid.mix(0.6).stroke_width(1))
            .light_line_style(self.colors.grid.mix(0.25).stroke_width(1))
            .label_style((FONT, 14.0).into_font().color(&fg))
            .axis_desc_style((FONT, 16.0).into_font().color(&fg))
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format_seconds(*y))
            .draw()?;

        for (i, curve) in curves.iter().enumerate() {
            let color = if with_legend {
                Palette99::pick(i).to_rgba()
            } else {
                self.colors.bars.to_rgba()
            };
            let drawn = chart.draw_series(LineSeries::new(
                curve.points.iter().map(|&(idx, t)| (idx as f64, t)),
                color.stroke_width(2),
            ))?;
            if with_legend {
                drawn.label(curve.label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }

        if with_legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(self.colors.background.mix(0.85).filled())
                .border_style(fg.stroke_width(1))
                .label_font((FONT, 14.0).into_font().color(&fg))
                .draw()?;
        }

        Ok(())
    }

    fn draw_histogram(
        &self,
        area: &DrawingArea<SVGBackend<'_>, Shift>,
        title_prefix: &str,
        times: &[f64],
    ) -> Result<(), RenderError> {
        let hist = histogram(times, self.settings.histogram_bins);
        let (x_lo, x_hi) = hist.range().unwrap_or((0.0, 1.0));

        // Density is scaled to counts so it shares the bar axis
        let scale = times.len() as f64 * hist.bin_width();
        let kde: Vec<(f64, f64)> = gaussian_kde(times, DEFAULT_KDE_POINTS)
            .into_iter()
            .map(|(x, d)| (x, d * scale))
            .collect();

        let y_top = kde
            .iter()
            .map(|&(_, y)| y)
            .fold(hist.max_count() as f64, f64::max)
            * 1.05;

        let fg = self.colors.foreground;
        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("{} (Histogram)", title_prefix),
                (FONT, 20.0).into_font().color(&fg),
            )
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(64)
            .build_cartesian_2d(x_lo..x_hi, 0.0..y_top.max(1.0))?;

        chart
            .configure_mesh()
            .x_desc("Time (sec)")
            .y_desc("Frequency")
            .axis_style(fg.stroke_width(1))
            .bold_line_style(self.colors.grid.mix(0.6).stroke_width(1))
            .light_line_style(self.colors.grid.mix(0.25).stroke_width(1))
            .label_style((FONT, 12.0).into_font().color(&fg))
            .axis_desc_style((FONT, 14.0).into_font().color(&fg))
            .x_labels(6)
            .x_label_formatter(&|x| format_seconds(*x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;

        let fill = self.colors.bars.mix(0.7).filled();
        let edge = self.colors.background.stroke_width(1);
        chart.draw_series(hist.bins.iter().map(|b| {
            Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], fill)
        }))?;
        chart.draw_series(hist.bins.iter().map(|b| {
            Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], edge)
        }))?;

        if !kde.is_empty() {
            chart.draw_series(LineSeries::new(kde, self.colors.accent.stroke_width(2)))?;
        }

        Ok(())
    }

    fn draw_box_plot(
        &self,
        area: &DrawingArea<SVGBackend<'_>, Shift>,
        title_prefix: &str,
        times: &[f64],
    ) -> Result<(), RenderError> {
        let Some(summary) = box_summary(times, DEFAULT_WHISKER_IQR) else {
            return Ok(());
        };
        let (lo, hi) = summary.extent();
        let (x_lo, x_hi) = padded(lo, hi, 0.05);

        let fg = self.colors.foreground;
        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("{} (Box Plot)", title_prefix),
                (FONT, 20.0).into_font().color(&fg),
            )
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(16)
            .build_cartesian_2d(x_lo..x_hi, 0.0..1.0)?;

        chart
            .configure_mesh()
            .x_desc("Time (sec)")
            .axis_style(fg.stroke_width(1))
            .bold_line_style(self.colors.grid.mix(0.6).stroke_width(1))
            .light_line_style(self.colors.grid.mix(0.25).stroke_width(1))
            .label_style((FONT, 12.0).into_font().color(&fg))
            .axis_desc_style((FONT, 14.0).into_font().color(&fg))
            .disable_y_mesh()
            .y_labels(0)
            .x_labels(6)
            .x_label_formatter(&|x| format_seconds(*x))
            .draw()?;

        let (box_lo, box_hi, mid) = (0.3, 0.7, 0.5);
        let line = fg.stroke_width(2);

        chart.draw_series(std::iter::once(Rectangle::new(
            [(summary.q1, box_lo), (summary.q3, box_hi)],
            self.colors.bars.mix(0.7).filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(summary.q1, box_lo), (summary.q3, box_hi)],
            line,
        )))?;

        let segments = [
            vec![(summary.median, box_lo), (summary.median, box_hi)],
            vec![(summary.whisker_low, mid), (summary.q1, mid)],
            vec![(summary.q3, mid), (summary.whisker_high, mid)],
            vec![(summary.whisker_low, 0.4), (summary.whisker_low, 0.6)],
            vec![(summary.whisker_high, 0.4), (summary.whisker_high, 0.6)],
        ];
        chart.draw_series(
            segments
                .into_iter()
                .map(|points| PathElement::new(points, line)),
        )?;

        chart.draw_series(
            summary
                .fliers
                .iter()
                .map(|&x| Circle::new((x, mid), 3, fg.stroke_width(1))),
        )?;

        Ok(())
    }
}

/// Widen a range by `margin` of its span; degenerate ranges get a unit-scale pad
fn padded(lo: f64, hi: f64, margin: f64) -> (f64, f64) {
    let span = hi - lo;
    if !span.is_finite() {
        return (0.0, 1.0);
    }
    if span <= 0.0 {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.5 };
        return (lo - pad, hi + pad);
    }
    (lo - span * margin, hi + span * margin)
}

fn format_seconds(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 {
        "0".to_string()
    } else if !(1e-3..1e4).contains(&magnitude) {
        format!("{:.1e}", value)
    } else {
        format!("{:.4}", value)
    }
}
