//! Sweep Execution
//!
//! Sequential, single-threaded. Each spec is run, ingested, summarized and
//! plotted before the next one starts; the combined plot is drawn once all
//! specs are done.

use super::metadata::build_report_meta;
use crate::cancel::CancelToken;
use crate::runner::{BenchmarkRunner, DEFAULT_GRACE_PERIOD, DEFAULT_TIMEOUT, ExecutionWarning};
use anyhow::Context;
use fxhash::FxHashMap;
use hashbench_core::{BenchmarkSpec, RunResult, label_for_path};
use hashbench_ingest::try_ingest_csv;
use hashbench_plot::{
    PlotRenderer, VisualSettings, combined_path, cumulative_path, distribution_path,
};
use hashbench_report::{
    FailureInfo, ReportMeta, RunMetrics, RunRecord, RunStatus, StatsReporter, SweepReport,
};
use hashbench_stats::{DescriptiveStats, describe};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Where per-run statistics tables are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsOutput {
    /// Standard output, interleaved with the sweep
    #[default]
    Stdout,
    /// Standard error, keeping stdout free for a machine-readable report
    Stderr,
    /// Not printed; metrics still land in the report
    Quiet,
}

/// Everything the pipeline needs, resolved up front
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Benchmark executable
    pub executable: PathBuf,
    /// Directory CSV artifacts are written to
    pub results_dir: PathBuf,
    /// Directory figures are written to
    pub plots_dir: PathBuf,
    /// Per-run timeout
    pub timeout: Duration,
    /// Time between SIGTERM and SIGKILL
    pub grace_period: Duration,
    /// Figure settings
    pub visuals: VisualSettings,
    /// Statistics table destination
    pub stats_output: StatsOutput,
    /// Show a progress bar on stderr
    pub progress: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("bin/benchmark_hashtab"),
            results_dir: PathBuf::from("benchmark/results"),
            plots_dir: PathBuf::from("benchmark/plots"),
            timeout: DEFAULT_TIMEOUT,
            grace_period: DEFAULT_GRACE_PERIOD,
            visuals: VisualSettings::default(),
            stats_output: StatsOutput::Stdout,
            progress: true,
        }
    }
}

/// Outcome of a sweep
#[derive(Debug)]
pub struct Sweep {
    /// Ingested runs, in configuration order
    pub runs: Vec<RunResult>,
    /// One record per spec plus the combined plot
    pub report: SweepReport,
}

/// Runs sweeps with fixed settings
pub struct Orchestrator {
    settings: PipelineSettings,
    renderer: PlotRenderer,
    cancel: CancelToken,
}

impl Orchestrator {
    /// Create an orchestrator; PNG output loads system fonts here
    pub fn new(settings: PipelineSettings) -> Self {
        Self {
            renderer: PlotRenderer::new(settings.visuals.clone()),
            settings,
            cancel: CancelToken::new(),
        }
    }

    /// Stop between (and during) runs once `cancel` fires
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Settings this orchestrator runs with
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Runner configured from these settings
    pub fn runner(&self) -> BenchmarkRunner {
        BenchmarkRunner::new(&self.settings.executable, &self.settings.results_dir)
            .with_timeout(self.settings.timeout)
            .with_grace_period(self.settings.grace_period)
            .with_cancel_token(self.cancel.clone())
    }

    /// Run every spec in order, then draw the combined plot
    ///
    /// Only setup failures are returned as errors. A benchmark that fails to
    /// run, ingest or render is recorded in the report instead.
    pub fn run_sweep(&self, specs: &[BenchmarkSpec]) -> anyhow::Result<Sweep> {
        let start = Instant::now();
        let meta = build_report_meta(Some(self.settings.executable.as_path()));

        if specs.is_empty() {
            tracing::info!("no benchmarks configured");
            return Ok(self.finish(meta, Vec::new(), Vec::new(), start));
        }

        let runner = self.runner();
        runner.prepare().with_context(|| {
            format!(
                "failed to create results directory {}",
                runner.results_dir().display()
            )
        })?;

        tracing::info!(
            benchmarks = specs.len(),
            executable = %self.settings.executable.display(),
            "starting sweep"
        );

        let pb = self.progress_bar(specs.len());
        let mut runs = Vec::new();
        let mut records = Vec::with_capacity(specs.len());

        for (i, spec) in specs.iter().enumerate() {
            let label = spec.label();
            pb.set_message(label.clone());
            let record = RunRecord::pending(&label, Some(spec.clone()), runner.artifact_path(spec));

            match runner.run(spec) {
                Ok(artifact) => {
                    self.process_artifact(record, &artifact, &pb, &mut runs, &mut records);
                }
                Err(warning) => {
                    tracing::warn!(
                        label = %label,
                        kind = warning.kind(),
                        "skipping benchmark: {}",
                        warning
                    );
                    let cancelled = matches!(warning, ExecutionWarning::Cancelled);
                    let status = if cancelled {
                        RunStatus::Cancelled
                    } else {
                        RunStatus::ExecutionFailed
                    };
                    records.push(record.skip(status, FailureInfo::new(warning.kind(), &warning)));

                    if cancelled {
                        for rest in &specs[i + 1..] {
                            tracing::warn!(label = %rest.label(), "skipping benchmark: sweep cancelled");
                            records.push(
                                RunRecord::pending(
                                    rest.label(),
                                    Some(rest.clone()),
                                    runner.artifact_path(rest),
                                )
                                .skip(
                                    RunStatus::Cancelled,
                                    FailureInfo::new("cancelled", "sweep cancelled"),
                                ),
                            );
                        }
                        pb.abandon_with_message("Cancelled");
                        return Ok(self.finish(meta, runs, records, start));
                    }
                }
            }
            pb.inc(1);
        }

        pb.finish_with_message("Complete");
        Ok(self.finish(meta, runs, records, start))
    }

    /// Ingest, summarize and plot existing artifacts without running anything
    ///
    /// Each artifact is labeled by its file stem. An artifact whose label is
    /// already taken by an earlier one is skipped, since both would write
    /// the same plot files.
    pub fn replot(&self, csvs: &[PathBuf]) -> Sweep {
        let start = Instant::now();
        let meta = build_report_meta(None);

        let pb = self.progress_bar(csvs.len());
        let mut runs = Vec::new();
        let mut records = Vec::with_capacity(csvs.len());
        let mut seen: FxHashMap<String, usize> = FxHashMap::default();

        for (i, path) in csvs.iter().enumerate() {
            let label = label_for_path(path);
            pb.set_message(label.clone());
            let record = RunRecord::pending(&label, None, path.clone());

            if let Some(&first) = seen.get(&label) {
                tracing::warn!(
                    path = %path.display(),
                    label = %label,
                    "skipping artifact: label already used by artifact #{}",
                    first
                );
                let message = format!(
                    "label {:?} already used by artifact #{} ({})",
                    label,
                    first,
                    csvs[first - 1].display()
                );
                records.push(record.skip(
                    RunStatus::IngestFailed,
                    FailureInfo::new("duplicate_label", message),
                ));
                pb.inc(1);
                continue;
            }
            seen.insert(label, i + 1);

            self.process_artifact(record, path, &pb, &mut runs, &mut records);
            pb.inc(1);
        }

        pb.finish_with_message("Complete");
        self.finish(meta, runs, records, start)
    }

    /// Ingest one artifact; on success print its statistics and render its
    /// two figures.
    fn process_artifact(
        &self,
        mut record: RunRecord,
        artifact: &Path,
        pb: &ProgressBar,
        runs: &mut Vec<RunResult>,
        records: &mut Vec<RunRecord>,
    ) {
        let run = match try_ingest_csv(artifact) {
            Ok(run) => run,
            Err(e) => {
                tracing::warn!(
                    path = %artifact.display(),
                    kind = e.kind(),
                    "skipping artifact: {}",
                    e
                );
                records.push(record.skip(RunStatus::IngestFailed, FailureInfo::new(e.kind(), &e)));
                return;
            }
        };

        let stats = pb.suspend(|| self.report_stats(&run));
        record.metrics = Some(RunMetrics::from(&stats));

        let plots_dir = &self.settings.plots_dir;
        let format = self.settings.visuals.format;
        let figures = [
            (
                "cumulative",
                self.renderer
                    .render_cumulative(&run, &cumulative_path(plots_dir, run.label(), format)),
            ),
            (
                "distribution",
                self.renderer
                    .render_distribution(&run, &distribution_path(plots_dir, run.label(), format)),
            ),
        ];
        for (figure, rendered) in figures {
            match rendered {
                Ok(plot) => {
                    tracing::debug!(path = %plot.path.display(), "wrote {} plot", figure);
                    record.plots.push(plot.path);
                }
                Err(e) => {
                    tracing::warn!(label = %run.label(), kind = e.kind(), "{} plot failed: {}", figure, e);
                    record.render_failures.push(FailureInfo::new(e.kind(), &e));
                }
            }
        }

        records.push(record);
        runs.push(run);
    }

    fn report_stats(&self, run: &RunResult) -> DescriptiveStats {
        let printed = match self.settings.stats_output {
            StatsOutput::Stdout => StatsReporter::stdout().report(run),
            StatsOutput::Stderr => StatsReporter::new(io::stderr()).report(run),
            StatsOutput::Quiet => StatsReporter::new(io::sink()).report(run),
        };
        printed.unwrap_or_else(|e| {
            tracing::warn!(label = %run.label(), "failed to print statistics: {}", e);
            describe(&run.times())
        })
    }

    /// Draw the combined plot and assemble the report
    fn finish(
        &self,
        meta: ReportMeta,
        runs: Vec<RunResult>,
        records: Vec<RunRecord>,
        start: Instant,
    ) -> Sweep {
        let (combined_plot, combined_failure, curves) = if runs.is_empty() {
            tracing::info!("no runs ingested, skipping combined plot");
            (None, None, Vec::new())
        } else {
            let path = combined_path(&self.settings.plots_dir, self.settings.visuals.format);
            match self.renderer.render_combined(&runs, &path) {
                Ok(plot) => {
                    tracing::debug!(
                        path = %plot.path.display(),
                        curves = plot.curves.len(),
                        "wrote combined plot"
                    );
                    let labels: Vec<String> = plot.curves.into_iter().map(|c| c.label).collect();
                    (Some(plot.path), None, labels)
                }
                Err(e) => {
                    tracing::warn!(kind = e.kind(), "combined plot failed: {}", e);
                    (None, Some(FailureInfo::new(e.kind(), &e)), Vec::new())
                }
            }
        };

        let report = SweepReport::new(
            meta,
            records,
            combined_plot,
            combined_failure,
            start.elapsed().as_secs_f64() * 1000.0,
        )
        .with_combined_curves(curves);

        let summary = &report.summary;
        if summary.has_skips() {
            tracing::warn!(
                execution_failures = summary.execution_failures,
                ingest_failures = summary.ingest_failures,
                cancelled = summary.cancelled,
                "{} of {} benchmarks skipped",
                summary.skipped(),
                summary.total_runs
            );
        } else {
            tracing::info!(succeeded = summary.succeeded, "sweep finished");
        }

        Sweep { runs, report }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.settings.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use hashbench_plot::ImageFormat;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::{TempDir, tempdir};

    // Fails for the "delete" mode, writes a small CSV otherwise
    const SCRIPT: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    --mode) mode="$2" ;;
    --output-file) out="$2" ;;
  esac
  shift
done
if [ "$mode" = "delete" ]; then exit 1; fi
if [ "$mode" = "garbage" ]; then printf 'only\n' > "$out"; exit 0; fi
printf 'Index,Time\n1,0.000001\n2,0.000003\n3,0.000002\n' > "$out"
"#;

    fn settings(dir: &TempDir) -> PipelineSettings {
        let exe = dir.path().join("bench.sh");
        fs::write(&exe, SCRIPT).unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();

        PipelineSettings {
            executable: exe,
            results_dir: dir.path().join("results"),
            plots_dir: dir.path().join("plots"),
            timeout: Duration::from_secs(10),
            grace_period: Duration::from_millis(100),
            visuals: VisualSettings {
                format: ImageFormat::Svg,
                ..VisualSettings::default()
            },
            stats_output: StatsOutput::Quiet,
            progress: false,
        }
    }

    fn spec(mode: &str) -> BenchmarkSpec {
        BenchmarkSpec::new(mode, "linear", "djb2", 3, 0.5, None)
    }

    fn plot_count(dir: &Path) -> usize {
        fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    #[test]
    fn test_failed_run_is_skipped() {
        let dir = tempdir().unwrap();
        let orchestrator = Orchestrator::new(settings(&dir));

        let sweep = orchestrator
            .run_sweep(&[spec("insert"), spec("delete")])
            .unwrap();

        assert_eq!(sweep.runs.len(), 1);
        assert_eq!(sweep.runs[0].label(), "insert_linear_djb2_0.5");
        assert_eq!(sweep.report.runs.len(), 2);
        assert_eq!(sweep.report.runs[0].status, RunStatus::Succeeded);
        assert_eq!(sweep.report.runs[0].plots.len(), 2);
        assert_eq!(sweep.report.runs[1].status, RunStatus::ExecutionFailed);
        assert_eq!(
            sweep.report.runs[1].failure.as_ref().unwrap().kind,
            "non_zero_exit"
        );
        assert_eq!(sweep.report.summary.execution_failures, 1);
        assert!(sweep.report.combined_plot.is_some());
        assert_eq!(plot_count(&dir.path().join("plots")), 3);
    }

    #[test]
    fn test_metrics_recorded() {
        let dir = tempdir().unwrap();
        let sweep = Orchestrator::new(settings(&dir))
            .run_sweep(&[spec("insert")])
            .unwrap();

        let metrics = sweep.report.runs[0].metrics.as_ref().unwrap();
        assert_eq!(metrics.samples, 3);
        assert!((metrics.max_s - 3e-6).abs() < 1e-12);
    }

    #[test]
    fn test_bad_artifact_is_ingest_failure() {
        let dir = tempdir().unwrap();
        let sweep = Orchestrator::new(settings(&dir))
            .run_sweep(&[spec("garbage")])
            .unwrap();

        assert!(sweep.runs.is_empty());
        assert_eq!(sweep.report.runs[0].status, RunStatus::IngestFailed);
        assert!(sweep.report.combined_plot.is_none());
        assert_eq!(plot_count(&dir.path().join("plots")), 0);
    }

    #[test]
    fn test_empty_sweep_invokes_nothing() {
        let dir = tempdir().unwrap();
        let sweep = Orchestrator::new(settings(&dir)).run_sweep(&[]).unwrap();

        assert!(sweep.runs.is_empty());
        assert!(sweep.report.runs.is_empty());
        assert!(!dir.path().join("results").exists());
        assert!(!sweep.report.summary.has_skips());
    }

    #[test]
    fn test_cancelled_sweep_marks_remaining() {
        let dir = tempdir().unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let sweep = Orchestrator::new(settings(&dir))
            .with_cancel_token(cancel)
            .run_sweep(&[spec("insert"), spec("lookup")])
            .unwrap();

        assert!(sweep.runs.is_empty());
        assert_eq!(sweep.report.summary.cancelled, 2);
        assert!(
            sweep
                .report
                .runs
                .iter()
                .all(|r| r.status == RunStatus::Cancelled)
        );
    }

    #[test]
    fn test_replot_existing_artifacts() {
        let dir = tempdir().unwrap();
        let csv = dir.path().join("lookup_quadratic_fnv1a_0.9.csv");
        fs::write(&csv, "Index,Time\n1,0.5\n2,0.25\n").unwrap();
        let missing = dir.path().join("missing.csv");

        let sweep = Orchestrator::new(settings(&dir)).replot(&[csv, missing]);

        assert_eq!(sweep.runs.len(), 1);
        assert_eq!(sweep.runs[0].label(), "lookup_quadratic_fnv1a_0.9");
        assert_eq!(sweep.report.summary.ingest_failures, 1);
        assert!(sweep.report.meta.executable.is_none());
        assert!(dir.path().join("plots/all_cumulative.svg").exists());
    }

    #[test]
    fn test_replot_skips_duplicate_labels() {
        let dir = tempdir().unwrap();
        for sub in ["first", "second"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("run.csv"), "Index,Time\n1,0.5\n").unwrap();
        }

        let sweep = Orchestrator::new(settings(&dir)).replot(&[
            dir.path().join("first/run.csv"),
            dir.path().join("second/run.csv"),
        ]);

        assert_eq!(sweep.runs.len(), 1);
        assert_eq!(sweep.report.runs[0].status, RunStatus::Succeeded);
        assert_eq!(sweep.report.runs[1].status, RunStatus::IngestFailed);
        assert_eq!(
            sweep.report.runs[1].failure.as_ref().unwrap().kind,
            "duplicate_label"
        );
        assert_eq!(sweep.report.combined_curves, vec!["run"]);
    }

    #[test]
    fn test_render_failure_keeps_sweep_going() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let settings = PipelineSettings {
            plots_dir: blocker,
            ..settings(&dir)
        };

        let sweep = Orchestrator::new(settings)
            .run_sweep(&[spec("insert"), spec("lookup")])
            .unwrap();

        assert_eq!(sweep.runs.len(), 2);
        for record in &sweep.report.runs {
            assert_eq!(record.status, RunStatus::Succeeded);
            assert!(record.metrics.is_some());
            assert!(record.plots.is_empty());
            assert_eq!(record.render_failures.len(), 2);
            assert!(record.render_failures.iter().all(|f| f.kind == "create_dir"));
        }
        assert!(sweep.report.combined_plot.is_none());
        assert_eq!(
            sweep.report.combined_failure.as_ref().unwrap().kind,
            "create_dir"
        );
        assert!(sweep.report.combined_curves.is_empty());
        assert_eq!(sweep.report.summary.render_failures, 5);
    }

    #[test]
    fn test_combined_curves_follow_ingested_runs() {
        let dir = tempdir().unwrap();
        let sweep = Orchestrator::new(settings(&dir))
            .run_sweep(&[spec("insert"), spec("delete"), spec("lookup")])
            .unwrap();

        assert_eq!(
            sweep.report.combined_curves,
            vec!["insert_linear_djb2_0.5", "lookup_linear_djb2_0.5"]
        );
    }
}
