#![warn(missing_docs)]
//! hashbench Core - Data Model
//!
//! Types shared by every stage of the pipeline:
//! - `BenchmarkSpec`: one parameterized invocation of the external hash-table executable
//! - `RunResult`: the normalized `(Index, Time)` table ingested from a run's CSV artifact
//! - `CumulativeSeries`: running sum of time ordered by operation index
//!
//! `RunResult` only hands out its pairs as an immutable slice. Every derived
//! series is computed into freshly owned storage, so rendering the same run
//! twice always yields the same values.

mod cumulative;
mod run;
mod spec;

pub use cumulative::{CumulativeSeries, cumulative_sum};
pub use run::{INDEX_COLUMN, RunResult, TIME_COLUMN, TimingPoint};
pub use spec::{
    BenchmarkSpec, DEFAULT_HASH, DEFAULT_LOAD_FACTOR, DEFAULT_MODE, DEFAULT_NUM_TESTS,
    DEFAULT_PROBE, KNOWN_HASHES, KNOWN_MODES, KNOWN_PROBES, LoadFactor, format_load_factor,
    label_for_path,
};
