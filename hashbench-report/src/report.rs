//! Report Data Structures

use chrono::{DateTime, Utc};
use hashbench_core::BenchmarkSpec;
use hashbench_stats::DescriptiveStats;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Report schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete record of one sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub meta: ReportMeta,
    pub runs: Vec<RunRecord>,
    /// Combined cumulative plot, absent when no run was ingested
    pub combined_plot: Option<PathBuf>,
    /// Why the combined plot could not be drawn
    pub combined_failure: Option<FailureInfo>,
    /// Legend of the combined plot, in drawing order
    #[serde(default)]
    pub combined_curves: Vec<String>,
    pub summary: SweepSummary,
}

impl SweepReport {
    /// Assemble a report and derive its summary
    pub fn new(
        meta: ReportMeta,
        runs: Vec<RunRecord>,
        combined_plot: Option<PathBuf>,
        combined_failure: Option<FailureInfo>,
        total_duration_ms: f64,
    ) -> Self {
        let mut summary = SweepSummary::from_runs(&runs, total_duration_ms);
        if combined_failure.is_some() {
            summary.render_failures += 1;
        }
        Self {
            meta,
            runs,
            combined_plot,
            combined_failure,
            combined_curves: Vec::new(),
            summary,
        }
    }

    /// Record the curve labels drawn in the combined plot
    pub fn with_combined_curves(mut self, labels: Vec<String>) -> Self {
        self.combined_curves = labels;
        self
    }

    /// Runs that did not produce statistics
    pub fn skipped(&self) -> impl Iterator<Item = &RunRecord> {
        self.runs.iter().filter(|r| r.status != RunStatus::Succeeded)
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    /// Benchmark executable, absent when replotting existing artifacts
    pub executable: Option<PathBuf>,
    pub git_commit: Option<String>,
    pub git_branch: Option<String>,
    pub system: SystemInfo,
}

/// System information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpu: String,
    pub cpu_cores: u32,
    pub memory_gb: f64,
}

/// One processed benchmark entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub label: String,
    /// Parameters the executable was invoked with
    pub spec: Option<BenchmarkSpec>,
    pub artifact: PathBuf,
    pub status: RunStatus,
    pub failure: Option<FailureInfo>,
    pub metrics: Option<RunMetrics>,
    /// Images written for this run
    pub plots: Vec<PathBuf>,
    /// Images that could not be written
    pub render_failures: Vec<FailureInfo>,
}

impl RunRecord {
    /// Record for a run that has not been processed yet
    pub fn pending(label: impl Into<String>, spec: Option<BenchmarkSpec>, artifact: PathBuf) -> Self {
        Self {
            label: label.into(),
            spec,
            artifact,
            status: RunStatus::Succeeded,
            failure: None,
            metrics: None,
            plots: Vec::new(),
            render_failures: Vec::new(),
        }
    }

    /// Mark the run as skipped
    pub fn skip(mut self, status: RunStatus, failure: FailureInfo) -> Self {
        self.status = status;
        self.failure = Some(failure);
        self
    }
}

/// Outcome of one benchmark entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Artifact ingested and summarized
    Succeeded,
    /// Executable failed, timed out or left no artifact
    ExecutionFailed,
    /// Artifact could not be read
    IngestFailed,
    /// Sweep was interrupted before or during this run
    Cancelled,
}

impl RunStatus {
    /// Short lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Succeeded => "succeeded",
            RunStatus::ExecutionFailed => "execution_failed",
            RunStatus::IngestFailed => "ingest_failed",
            RunStatus::Cancelled => "cancelled",
        }
    }
}

/// Timing metrics in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub samples: usize,
    pub mean_s: f64,
    pub std_dev_s: f64,
    pub min_s: f64,
    pub median_s: f64,
    pub p95_s: f64,
    pub p99_s: f64,
    pub max_s: f64,
    pub total_s: f64,
    pub throughput_ops_sec: Option<f64>,
}

impl From<&DescriptiveStats> for RunMetrics {
    fn from(stats: &DescriptiveStats) -> Self {
        Self {
            samples: stats.count,
            mean_s: stats.mean,
            std_dev_s: stats.std_dev,
            min_s: stats.min,
            median_s: stats.median,
            p95_s: stats.p95,
            p99_s: stats.p99,
            max_s: stats.max,
            total_s: stats.total(),
            throughput_ops_sec: stats.throughput(),
        }
    }
}

/// Failure information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureInfo {
    pub kind: String,
    pub message: String,
}

impl FailureInfo {
    /// Create failure info from a kind tag and any displayable error
    pub fn new(kind: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self {
            kind: kind.into(),
            message: message.to_string(),
        }
    }
}

/// Report summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub total_runs: usize,
    pub succeeded: usize,
    pub execution_failures: usize,
    pub ingest_failures: usize,
    pub cancelled: usize,
    pub render_failures: usize,
    pub total_duration_ms: f64,
}

impl SweepSummary {
    /// Count outcomes across runs
    pub fn from_runs(runs: &[RunRecord], total_duration_ms: f64) -> Self {
        let mut summary = Self {
            total_runs: runs.len(),
            total_duration_ms,
            ..Self::default()
        };
        for run in runs {
            match run.status {
                RunStatus::Succeeded => summary.succeeded += 1,
                RunStatus::ExecutionFailed => summary.execution_failures += 1,
                RunStatus::IngestFailed => summary.ingest_failures += 1,
                RunStatus::Cancelled => summary.cancelled += 1,
            }
            summary.render_failures += run.render_failures.len();
        }
        summary
    }

    /// Runs that produced no statistics
    pub fn skipped(&self) -> usize {
        self.execution_failures + self.ingest_failures + self.cancelled
    }

    /// Whether anything was skipped or failed to render
    pub fn has_skips(&self) -> bool {
        self.skipped() > 0 || self.render_failures > 0
    }
}
