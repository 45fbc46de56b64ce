#![warn(missing_docs)]
//! # hashbench
//!
//! Parameter sweeps over an external hash-table benchmark executable.
//!
//! A sweep file lists runs (`mode`, `probe`, `hash`, `num_tests`,
//! `load_factor`, `output_file`). hashbench invokes the executable once per
//! run, reads the `(index, time)` CSV each run writes, and for every run
//! that produced one:
//! - prints descriptive statistics (mean, std, percentiles, p99)
//! - plots cumulative time against operation index
//! - plots the time distribution (histogram with density, box plot)
//!
//! Once all runs are done it plots every cumulative curve on one chart.
//! A run that fails, times out or leaves an unreadable CSV is skipped and
//! reported at the end; it never stops the sweep.
//!
//! ## Quick Start
//!
//! ```text
//! $ hashbench init                 # write hashbench.toml
//! $ hashbench list                 # show planned invocations
//! $ hashbench 'insert_.*'          # run matching benchmarks
//! $ hashbench plot results/*.csv   # replot existing artifacts
//! ```
//!
//! ## Library Use
//!
//! ```ignore
//! use hashbench::{Orchestrator, PipelineSettings, SweepConfig};
//!
//! let sweep = SweepConfig::load("benchmark/config.json")?;
//! let result = Orchestrator::new(PipelineSettings::default()).run_sweep(&sweep.benchmarks)?;
//! println!("{}", hashbench::format_human_output(&result.report));
//! ```

// Re-export core types
pub use hashbench_core::{
    BenchmarkSpec, CumulativeSeries, LoadFactor, RunResult, TimingPoint, cumulative_sum,
};

// Re-export ingestion
pub use hashbench_ingest::{IngestError, ingest_csv, try_ingest_csv};

// Re-export stats
pub use hashbench_stats::{DescriptiveStats, describe};

// Re-export rendering
pub use hashbench_plot::{ImageFormat, PlotRenderer, RenderError, Theme, VisualSettings};

// Re-export reporting
pub use hashbench_report::{
    OutputFormat, RunStatus, SweepReport, format_human_output, print_statistics, render_report,
};

// Re-export orchestration
pub use hashbench_cli::{
    BenchmarkRunner, CancelToken, ConfigError, ExecutionWarning, Orchestrator, PipelineSettings,
    StatsOutput, Sweep, SweepConfig, ToolConfig,
};

/// Run the hashbench CLI.
///
/// This is what the `hashbench` binary's `main()` calls:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     hashbench::run()
/// }
/// ```
pub use hashbench_cli::run;
