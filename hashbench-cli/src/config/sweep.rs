//! Sweep Definition
//!
//! ```json
//! {"benchmarks": [{"mode": "insert", "probe": "linear", "hash": "djb2",
//!                  "num_tests": 100000, "load_factor": 0.75, "output_file": ""}]}
//! ```
//!
//! Every field of an entry is optional. A missing, null or empty `benchmarks`
//! list is a valid sweep with nothing to run.

use super::ConfigError;
use fxhash::FxHashMap;
use hashbench_core::{
    BenchmarkSpec, DEFAULT_HASH, DEFAULT_LOAD_FACTOR, DEFAULT_MODE, DEFAULT_NUM_TESTS,
    DEFAULT_PROBE, KNOWN_HASHES, KNOWN_MODES, KNOWN_PROBES, LoadFactor,
};
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
struct RawSweep {
    #[serde(default)]
    benchmarks: Option<Vec<RawEntry>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEntry {
    mode: Option<String>,
    probe: Option<String>,
    hash: Option<String>,
    num_tests: Option<u64>,
    load_factor: Option<serde_json::Number>,
    output_file: Option<String>,
}

impl RawEntry {
    fn into_spec(self) -> BenchmarkSpec {
        BenchmarkSpec::new(
            self.mode.unwrap_or_else(|| DEFAULT_MODE.to_string()),
            self.probe.unwrap_or_else(|| DEFAULT_PROBE.to_string()),
            self.hash.unwrap_or_else(|| DEFAULT_HASH.to_string()),
            self.num_tests.unwrap_or(DEFAULT_NUM_TESTS),
            match self.load_factor {
                // Name files after the number as written
                Some(n) => LoadFactor::with_text(n.as_f64().unwrap_or(f64::NAN), n.to_string()),
                None => LoadFactor::from(DEFAULT_LOAD_FACTOR),
            },
            self.output_file.as_deref(),
        )
    }
}

/// Validated list of benchmark runs, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepConfig {
    pub benchmarks: Vec<BenchmarkSpec>,
}

impl SweepConfig {
    /// Load and validate a sweep file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|e| match e {
            ParseFailure::Json(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::Invalid(e) => e,
        })
    }

    /// Parse and validate sweep JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::parse(json).map_err(|e| match e {
            ParseFailure::Json(source) => ConfigError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            },
            ParseFailure::Invalid(e) => e,
        })
    }

    fn parse(json: &str) -> Result<Self, ParseFailure> {
        let raw: RawSweep = serde_json::from_str(json).map_err(ParseFailure::Json)?;
        let benchmarks = raw
            .benchmarks
            .unwrap_or_default()
            .into_iter()
            .map(RawEntry::into_spec)
            .collect();

        let config = Self { benchmarks };
        config.validate().map_err(ParseFailure::Invalid)?;
        Ok(config)
    }

    /// Number of runs
    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    /// Whether there is nothing to run
    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    /// Check every entry; entries are numbered from 1 in errors
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut outputs: FxHashMap<PathBuf, usize> = FxHashMap::default();
        let mut labels: FxHashMap<String, usize> = FxHashMap::default();

        for (i, spec) in self.benchmarks.iter().enumerate() {
            let entry = i + 1;

            if spec.num_tests == 0 {
                return Err(ConfigError::InvalidNumTests { entry });
            }
            if !(spec.load_factor.is_finite() && spec.load_factor > 0.0 && spec.load_factor <= 1.0)
            {
                return Err(ConfigError::InvalidLoadFactor {
                    entry,
                    value: spec.load_factor,
                });
            }

            if let Some(&first) = outputs.get(&normalized(&spec.output_file)) {
                return Err(ConfigError::DuplicateOutput {
                    path: spec.output_file.clone(),
                    first,
                    second: entry,
                });
            }
            outputs.insert(normalized(&spec.output_file), entry);

            let label = spec.label();
            if let Some(&first) = labels.get(&label) {
                return Err(ConfigError::DuplicateLabel {
                    label,
                    first,
                    second: entry,
                });
            }
            labels.insert(label, entry);

            warn_unknown(entry, "mode", &spec.mode, KNOWN_MODES);
            warn_unknown(entry, "probe", &spec.probe, KNOWN_PROBES);
            warn_unknown(entry, "hash", &spec.hash, KNOWN_HASHES);
        }

        Ok(())
    }
}

enum ParseFailure {
    Json(serde_json::Error),
    Invalid(ConfigError),
}

/// `./a.csv` and `a.csv` name the same artifact
fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn warn_unknown(entry: usize, field: &str, value: &str, known: &[&str]) {
    if !known.contains(&value) {
        tracing::warn!(
            entry,
            field,
            value,
            "not a name the reference executable accepts; passing it through"
        );
    }
}
