//! Benchmark Specification
//!
//! One entry of the sweep: the parameters handed to the external executable
//! and the file name its CSV artifact is written to.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default benchmark mode
pub const DEFAULT_MODE: &str = "insert";
/// Default probe strategy
pub const DEFAULT_PROBE: &str = "linear";
/// Default hash function
pub const DEFAULT_HASH: &str = "djb2";
/// Default number of operations per run
pub const DEFAULT_NUM_TESTS: u64 = 100_000;
/// Default load factor
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Modes understood by the reference `benchmark_hashtab` executable
pub const KNOWN_MODES: &[&str] = &["insert", "lookup", "mixed"];
/// Probe strategies understood by the reference executable
pub const KNOWN_PROBES: &[&str] = &["linear", "quadratic", "double_hash"];
/// Hash functions understood by the reference executable
pub const KNOWN_HASHES: &[&str] = &["djb2", "sdbm", "fnv1a", "murmur3_32", "crc32"];

/// Load factor together with the text it is written as
///
/// Names and command lines use the text, so `1` in a sweep file stays `1`
/// while `1.0` stays `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFactor {
    value: f64,
    text: String,
}

impl LoadFactor {
    /// Load factor written exactly as `text`
    pub fn with_text(value: f64, text: impl Into<String>) -> Self {
        Self {
            value,
            text: text.into(),
        }
    }

    /// Numeric value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Text form
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<f64> for LoadFactor {
    fn from(value: f64) -> Self {
        Self::with_text(value, format_load_factor(value))
    }
}

/// A single parameterized benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSpec {
    /// Benchmark mode (e.g. "insert", "lookup")
    pub mode: String,
    /// Probe strategy, passed through verbatim
    pub probe: String,
    /// Hash function name, passed through verbatim
    pub hash: String,
    /// Number of operations to time
    pub num_tests: u64,
    /// Load factor in (0, 1]
    pub load_factor: f64,
    /// Artifact file name, relative to the results directory unless absolute
    pub output_file: PathBuf,
    #[serde(skip)]
    load_factor_text: String,
}

impl BenchmarkSpec {
    /// Build a spec, synthesizing the output file name when `output_file` is blank.
    pub fn new(
        mode: impl Into<String>,
        probe: impl Into<String>,
        hash: impl Into<String>,
        num_tests: u64,
        load_factor: impl Into<LoadFactor>,
        output_file: Option<&str>,
    ) -> Self {
        let mode = mode.into();
        let probe = probe.into();
        let hash = hash.into();
        let load_factor = load_factor.into();

        let output_file = match output_file.map(str::trim) {
            Some(name) if !name.is_empty() => PathBuf::from(name),
            _ => PathBuf::from(Self::default_output_file(
                &mode,
                &probe,
                &hash,
                load_factor.as_str(),
            )),
        };

        Self {
            mode,
            probe,
            hash,
            num_tests,
            load_factor: load_factor.value,
            output_file,
            load_factor_text: load_factor.text,
        }
    }

    /// File name used when a sweep entry leaves `output_file` blank.
    ///
    /// Format: `{mode}_{probe}_{hash}_{load_factor}.csv`
    pub fn default_output_file(mode: &str, probe: &str, hash: &str, load_factor: &str) -> String {
        format!("{}_{}_{}_{}.csv", mode, probe, hash, load_factor)
    }

    /// Run label derived from the artifact file name
    pub fn label(&self) -> String {
        label_for_path(&self.output_file)
    }

    /// Load factor as passed on the executable's command line
    pub fn load_factor_arg(&self) -> String {
        if self.load_factor_text.is_empty() {
            format_load_factor(self.load_factor)
        } else {
            self.load_factor_text.clone()
        }
    }

    /// Resolve the artifact path against a results directory
    pub fn output_path(&self, results_dir: &Path) -> PathBuf {
        results_dir.join(&self.output_file)
    }
}

/// Shortest round-trip decimal form of a float, always with a fractional
/// part (`0.75`, `1.0`).
pub fn format_load_factor(load_factor: f64) -> String {
    format!("{:?}", load_factor)
}

/// Label for an artifact: its file name with a trailing `.csv` removed.
pub fn label_for_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(".csv") {
        Some(stem) => stem.to_string(),
        None => name,
    }
}
