//! Configuration
//!
//! Two sources feed a sweep:
//! - the sweep definition (JSON): which benchmark runs to perform
//! - `hashbench.toml` (TOML): where things live and how runs are supervised

mod sweep;
mod tool;

pub use sweep::SweepConfig;
pub use tool::{CONFIG_FILE_NAME, OutputConfig, PathsConfig, RunnerConfig, ToolConfig};

use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problems, reported before any run starts
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sweep file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid sweep file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("benchmark #{entry}: num_tests must be positive")]
    InvalidNumTests { entry: usize },

    #[error("benchmark #{entry}: load_factor must be in (0, 1], got {value}")]
    InvalidLoadFactor { entry: usize, value: f64 },

    #[error("benchmarks #{first} and #{second} both write {path}")]
    DuplicateOutput {
        path: PathBuf,
        first: usize,
        second: usize,
    },

    #[error("benchmarks #{first} and #{second} share the label {label:?}")]
    DuplicateLabel {
        label: String,
        first: usize,
        second: usize,
    },

    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),

    #[error("invalid value for {key}: {message}")]
    InvalidSetting { key: &'static str, message: String },
}
