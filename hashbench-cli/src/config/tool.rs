//! Configuration loading from hashbench.toml
//!
//! Tool settings can be specified in a `hashbench.toml` file in the project
//! root. The file is discovered by walking up from the current directory;
//! every key is optional.

use super::ConfigError;
use hashbench_plot::VisualSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "hashbench.toml";

/// hashbench tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ToolConfig {
    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,
    /// Executable supervision
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Figure settings
    #[serde(default)]
    pub visuals: VisualSettings,
    /// Report output
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input and output locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsConfig {
    /// Sweep definition (JSON)
    #[serde(default = "default_sweep")]
    pub sweep: PathBuf,
    /// Hash-table benchmark executable
    #[serde(default = "default_executable")]
    pub executable: PathBuf,
    /// Where runs write their CSV artifacts
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Where figures are written
    #[serde(default = "default_plots_dir")]
    pub plots_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sweep: default_sweep(),
            executable: default_executable(),
            results_dir: default_results_dir(),
            plots_dir: default_plots_dir(),
        }
    }
}

fn default_sweep() -> PathBuf {
    PathBuf::from("benchmark/config.json")
}
fn default_executable() -> PathBuf {
    PathBuf::from("bin/benchmark_hashtab")
}
fn default_results_dir() -> PathBuf {
    PathBuf::from("benchmark/results")
}
fn default_plots_dir() -> PathBuf {
    PathBuf::from("benchmark/plots")
}

/// Executable supervision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunnerConfig {
    /// Timeout for a single run (e.g., "60s", "10m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
    /// Time between SIGTERM and kill once a run is stopped
    #[serde(default = "default_grace_period")]
    pub grace_period: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            grace_period: default_grace_period(),
        }
    }
}

fn default_timeout() -> String {
    "10m".to_string()
}
fn default_grace_period() -> String {
    "500ms".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Report format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Exit with status 1 when any run was skipped
    #[serde(default)]
    pub fail_on_skip: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            fail_on_skip: false,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl ToolConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Walk up from `start` looking for `hashbench.toml`
    pub fn find(start: &Path) -> Option<PathBuf> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Discover and load configuration from the current directory upwards
    ///
    /// `Ok(None)` when no file exists; a file that exists but does not parse
    /// is an error.
    pub fn discover() -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let Ok(cwd) = std::env::current_dir() else {
            return Ok(None);
        };
        match Self::find(&cwd) {
            Some(path) => {
                let config = Self::load(&path)?;
                Ok(Some((path, config)))
            }
            None => Ok(None),
        }
    }

    /// Runner timeout as a duration
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        Self::parse_duration(&self.runner.timeout)
    }

    /// Grace period as a duration
    pub fn grace_period(&self) -> Result<Duration, ConfigError> {
        Self::parse_duration(&self.runner.grace_period)
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# hashbench Configuration

[paths]
# Sweep definition: {"benchmarks": [{"mode": ..., "probe": ..., ...}]}
sweep = "benchmark/config.json"
# Hash-table benchmark executable
executable = "bin/benchmark_hashtab"
# CSV artifacts, one per run
results_dir = "benchmark/results"
# Figures
plots_dir = "benchmark/plots"

[runner]
# Timeout for a single run
timeout = "10m"
# Time between SIGTERM and kill when a run is stopped
grace_period = "500ms"

[visuals]
# Image format: png or svg
format = "png"
# Color theme: light or dark
theme = "light"
# Figure dimensions
width = 1280
height = 720
# Histogram bins in distribution plots
histogram_bins = 50

[output]
# Report format: human, json, csv
format = "human"
# Exit with status 1 if any run was skipped
fail_on_skip = false
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m")
    pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
        let invalid = || ConfigError::InvalidDuration(s.to_string());
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = trimmed
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| trimmed.split_at(i))
            .unwrap_or((trimmed, "s"));

        let value: f64 = num_part.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            "h" => 3_600_000_000_000,
            _ => return Err(invalid()),
        };

        let nanos = (value * multiplier as f64).round();
        if nanos >= u64::MAX as f64 {
            return Err(invalid());
        }
        Ok(Duration::from_nanos(nanos as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbench_plot::{ImageFormat, Theme};
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ToolConfig::default();
        assert_eq!(config.paths.executable, PathBuf::from("bin/benchmark_hashtab"));
        assert_eq!(config.runner.timeout, "10m");
        assert_eq!(config.output.format, "human");
        assert!(!config.output.fail_on_skip);
        assert_eq!(config.timeout().unwrap(), Duration::from_secs(600));
    }

    #[test]
    fn test_parse_duration() {
        let ms = |n| Duration::from_millis(n);
        assert_eq!(ToolConfig::parse_duration("3s").unwrap(), ms(3000));
        assert_eq!(ToolConfig::parse_duration("500ms").unwrap(), ms(500));
        assert_eq!(ToolConfig::parse_duration("2m").unwrap(), ms(120_000));
        assert_eq!(ToolConfig::parse_duration("1.5s").unwrap(), ms(1500));
        assert_eq!(ToolConfig::parse_duration("45").unwrap(), ms(45_000));
        assert_eq!(
            ToolConfig::parse_duration("100us").unwrap(),
            Duration::from_micros(100)
        );
        assert!(ToolConfig::parse_duration("").is_err());
        assert!(ToolConfig::parse_duration("soon").is_err());
        assert!(ToolConfig::parse_duration("5 fortnights").is_err());
        assert!(ToolConfig::parse_duration("-1s").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [paths]
            executable = "build/bench"

            [visuals]
            theme = "dark"
            format = "svg"
        "#;

        let config: ToolConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.paths.executable, PathBuf::from("build/bench"));
        assert_eq!(config.visuals.theme, Theme::Dark);
        assert_eq!(config.visuals.format, ImageFormat::Svg);
        // Defaults should still apply
        assert_eq!(config.visuals.width, 1280);
        assert_eq!(config.paths.results_dir, PathBuf::from("benchmark/results"));
        assert_eq!(config.runner.grace_period, "500ms");
    }

    #[test]
    fn test_default_toml_parses() {
        let config: ToolConfig = toml::from_str(&ToolConfig::default_toml()).unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn test_find_walks_up() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[output]\nformat = \"json\"\n").unwrap();

        let found = ToolConfig::find(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(ToolConfig::load(&found).unwrap().output.format, "json");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[runner\ntimeout = 3").unwrap();
        assert!(matches!(
            ToolConfig::load(&path),
            Err(ConfigError::Toml { .. })
        ));
    }
}
