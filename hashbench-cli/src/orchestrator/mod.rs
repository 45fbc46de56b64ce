//! Sweep Orchestrator
//!
//! Drives one sweep end to end. Every stage below the configuration is
//! isolated per benchmark: a failure skips that benchmark and is recorded in
//! the [`SweepReport`](hashbench_report::SweepReport), the sweep carries on.
//!
//! ## Pipeline Overview
//!
//! ```text
//! BenchmarkSpec (from the sweep file)
//!       │
//!       ▼
//! ┌─────────────┐
//! │   runner    │  Invoke the executable, wait under timeout
//! └──────┬──────┘
//!        │ artifact
//!        ▼
//! ┌─────────────┐
//! │   ingest    │  CSV → RunResult
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │    stats    │  Print describe table, keep metrics
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   render    │  Cumulative + distribution per run
//! └──────┬──────┘
//!        │ after the last spec
//!        ▼
//! ┌─────────────┐
//! │   combine   │  all_cumulative over every ingested run
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Sweep driver and replot
//! - [`metadata`] - Host metadata for the report header

mod execution;
mod metadata;

pub use execution::{Orchestrator, PipelineSettings, StatsOutput, Sweep};
pub use metadata::build_report_meta;
