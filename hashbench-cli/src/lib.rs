#![warn(missing_docs)]
//! hashbench CLI Library
//!
//! Command-line front end for hash-table benchmark sweeps. A sweep reads a
//! JSON list of runs, invokes the external benchmark executable once per
//! run, prints descriptive statistics for each CSV it writes and renders
//! cumulative and distribution plots, then one combined plot.
//!
//! Call `hashbench_cli::run()` from `main`.
//!
//! Settings are layered: command-line flags over `hashbench.toml` (found by
//! walking up from the current directory) over built-in defaults. Relative
//! paths in `hashbench.toml` are taken relative to the file itself.

mod cancel;
mod config;
mod orchestrator;
mod planner;
mod runner;

pub use cancel::CancelToken;
pub use config::*;
pub use orchestrator::{Orchestrator, PipelineSettings, StatsOutput, Sweep, build_report_meta};
pub use planner::{ExecutionPlan, build_plan};
pub use runner::{BenchmarkRunner, DEFAULT_GRACE_PERIOD, DEFAULT_TIMEOUT, ExecutionWarning};

use anyhow::Context;
use clap::{Parser, Subcommand};
use hashbench_report::{OutputFormat, SweepReport, render_report};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// hashbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "hashbench")]
#[command(author, version, about = "hashbench - hash table benchmark sweeps")]
pub struct Cli {
    /// Optional subcommand (Run, List, Plot, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter runs by regex over their labels
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Sweep definition (JSON)
    #[arg(long, global = true)]
    pub sweep: Option<PathBuf>,

    /// Benchmark executable
    #[arg(long, global = true)]
    pub executable: Option<PathBuf>,

    /// Directory for CSV artifacts
    #[arg(long, global = true)]
    pub results_dir: Option<PathBuf>,

    /// Directory for plots
    #[arg(long, global = true)]
    pub plots_dir: Option<PathBuf>,

    /// Per-run timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format: human, json, csv
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Exit with status 1 if any run was skipped
    #[arg(long, global = true)]
    pub fail_on_skip: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the sweep (default)
    Run {
        /// Filter runs by regex over their labels
        filter: Option<String>,
    },
    /// Print the planned invocations without running them
    List {
        /// Filter runs by regex over their labels
        filter: Option<String>,
    },
    /// Summarize and plot existing CSV artifacts
    Plot {
        /// Artifacts to plot; each is labeled by its file stem
        #[arg(required = true)]
        csvs: Vec<PathBuf>,
    },
    /// Write a default hashbench.toml in the current directory
    Init,
}

/// Settings after layering flags over the file config
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    /// Sweep definition to load
    pub sweep: PathBuf,
    /// Pipeline settings handed to the orchestrator
    pub pipeline: PipelineSettings,
    /// Report format
    pub format: OutputFormat,
    /// Exit with status 1 on skips
    pub fail_on_skip: bool,
}

/// Run the hashbench CLI with the process arguments.
/// This is the main entry point for the `hashbench` binary.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the hashbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.verbose);

    if let Some(Commands::Init) = cli.command {
        return init_config();
    }

    let (config_dir, config) = match ToolConfig::discover()? {
        Some((path, config)) => {
            tracing::info!(path = %path.display(), "using configuration");
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            (Some(dir), config)
        }
        None => (None, ToolConfig::default()),
    };
    let settings = resolve_settings(&cli, &config, config_dir.as_deref())?;

    match cli.command {
        Some(Commands::List { ref filter }) => {
            list_benchmarks(&settings, filter.as_deref().unwrap_or(&cli.filter))
        }
        Some(Commands::Plot { ref csvs }) => plot_artifacts(&cli, &settings, csvs),
        Some(Commands::Run { ref filter }) => {
            run_sweep(&cli, &settings, filter.as_deref().unwrap_or(&cli.filter))
        }
        Some(Commands::Init) => Ok(()),
        None => run_sweep(&cli, &settings, &cli.filter),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "hashbench=debug"
    } else {
        "hashbench=info"
    };
    // Logs go to stderr so a JSON or CSV report on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Layer command-line flags over `config`
///
/// Relative paths from the file config are joined to `config_dir`; paths
/// given on the command line are used as written.
pub fn resolve_settings(
    cli: &Cli,
    config: &ToolConfig,
    config_dir: Option<&Path>,
) -> Result<ResolvedSettings, ConfigError> {
    let from_file = |path: &Path| match config_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    };
    let pick = |flag: &Option<PathBuf>, configured: &Path| {
        flag.clone().unwrap_or_else(|| from_file(configured))
    };

    let format_name = cli.format.as_deref().unwrap_or(&config.output.format);
    let format: OutputFormat = format_name
        .parse()
        .map_err(|message| ConfigError::InvalidSetting {
            key: "output.format",
            message,
        })?;

    let timeout = match cli.timeout {
        Some(secs) => Duration::from_secs(secs),
        None => config.timeout()?,
    };
    if timeout.is_zero() {
        return Err(ConfigError::InvalidSetting {
            key: "runner.timeout",
            message: "must be positive".to_string(),
        });
    }

    // Machine-readable reports on stdout must not be interleaved with tables
    let stats_output = match (format, &cli.output) {
        (OutputFormat::Human, _) | (_, Some(_)) => StatsOutput::Stdout,
        _ => StatsOutput::Stderr,
    };

    Ok(ResolvedSettings {
        sweep: pick(&cli.sweep, &config.paths.sweep),
        pipeline: PipelineSettings {
            executable: pick(&cli.executable, &config.paths.executable),
            results_dir: pick(&cli.results_dir, &config.paths.results_dir),
            plots_dir: pick(&cli.plots_dir, &config.paths.plots_dir),
            timeout,
            grace_period: config.grace_period()?,
            visuals: config.visuals.clone(),
            stats_output,
            progress: true,
        },
        format,
        fail_on_skip: cli.fail_on_skip || config.output.fail_on_skip,
    })
}

fn plan_sweep(settings: &ResolvedSettings, filter: &str) -> anyhow::Result<ExecutionPlan> {
    let sweep = SweepConfig::load(&settings.sweep)?;
    let filter_re =
        Regex::new(filter).with_context(|| format!("invalid filter pattern {:?}", filter))?;

    let plan = build_plan(sweep.benchmarks, Some(&filter_re));
    if plan.filtered_out > 0 {
        tracing::info!(filtered_out = plan.filtered_out, "filter excluded benchmarks");
    }
    Ok(plan)
}

fn list_benchmarks(settings: &ResolvedSettings, filter: &str) -> anyhow::Result<()> {
    let plan = plan_sweep(settings, filter)?;
    let runner = BenchmarkRunner::new(
        &settings.pipeline.executable,
        &settings.pipeline.results_dir,
    );

    println!("hashbench Plan:");
    for spec in &plan.benchmarks {
        println!("├── {}", spec.label());
        println!("│   └── {}", runner.command_line(spec).join(" "));
    }
    println!(
        "{} benchmarks planned ({} filtered out).",
        plan.benchmarks.len(),
        plan.filtered_out
    );
    Ok(())
}

fn run_sweep(cli: &Cli, settings: &ResolvedSettings, filter: &str) -> anyhow::Result<()> {
    let plan = plan_sweep(settings, filter)?;

    let orchestrator = Orchestrator::new(settings.pipeline.clone())
        .with_cancel_token(CancelToken::watch_sigint());
    let sweep = orchestrator.run_sweep(&plan.benchmarks)?;

    finish(cli, settings, &sweep.report)
}

fn plot_artifacts(cli: &Cli, settings: &ResolvedSettings, csvs: &[PathBuf]) -> anyhow::Result<()> {
    let sweep = Orchestrator::new(settings.pipeline.clone()).replot(csvs);
    finish(cli, settings, &sweep.report)
}

/// Write the report, then exit 1 if skips should fail the invocation
fn finish(cli: &Cli, settings: &ResolvedSettings, report: &SweepReport) -> anyhow::Result<()> {
    let output = render_report(report, settings.format).map_err(anyhow::Error::msg)?;

    if let Some(ref path) = cli.output {
        std::fs::write(path, output.as_bytes())
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    if settings.fail_on_skip && report.summary.has_skips() {
        eprintln!("\n{} benchmark(s) skipped", report.summary.skipped());
        std::process::exit(1);
    }

    Ok(())
}

fn init_config() -> anyhow::Result<()> {
    let path = std::env::current_dir()?.join(CONFIG_FILE_NAME);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    std::fs::write(&path, ToolConfig::default_toml())
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hashbench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_runs_everything() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.filter, ".*");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["list", "^insert", "--sweep", "sweep.json", "--timeout", "5"]);
        assert!(matches!(
            cli.command,
            Some(Commands::List { filter: Some(ref f) }) if f == "^insert"
        ));
        assert_eq!(cli.sweep, Some(PathBuf::from("sweep.json")));
        assert_eq!(cli.timeout, Some(5));
    }

    #[test]
    fn test_plot_requires_artifacts() {
        assert!(Cli::try_parse_from(["hashbench", "plot"]).is_err());
        let cli = parse(&["plot", "a.csv", "b.csv"]);
        assert!(matches!(cli.command, Some(Commands::Plot { ref csvs }) if csvs.len() == 2));
    }

    #[test]
    fn test_defaults_without_config_file() {
        let settings = resolve_settings(&parse(&[]), &ToolConfig::default(), None).unwrap();

        assert_eq!(settings.sweep, PathBuf::from("benchmark/config.json"));
        assert_eq!(
            settings.pipeline.executable,
            PathBuf::from("bin/benchmark_hashtab")
        );
        assert_eq!(settings.pipeline.timeout, Duration::from_secs(600));
        assert_eq!(settings.pipeline.grace_period, Duration::from_millis(500));
        assert_eq!(settings.format, OutputFormat::Human);
        assert_eq!(settings.pipeline.stats_output, StatsOutput::Stdout);
        assert!(!settings.fail_on_skip);
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut config = ToolConfig::default();
        config.runner.timeout = "30s".to_string();
        config.output.format = "csv".to_string();

        let cli = parse(&["--timeout", "2", "--format", "json", "--results-dir", "out"]);
        let settings = resolve_settings(&cli, &config, Some(Path::new("/project"))).unwrap();

        assert_eq!(settings.pipeline.timeout, Duration::from_secs(2));
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.pipeline.results_dir, PathBuf::from("out"));
        // Not overridden: relative to the config file
        assert_eq!(
            settings.pipeline.plots_dir,
            PathBuf::from("/project/benchmark/plots")
        );
        assert_eq!(settings.pipeline.stats_output, StatsOutput::Stderr);
    }

    #[test]
    fn test_config_file_values_apply() {
        let mut config = ToolConfig::default();
        config.runner.timeout = "30s".to_string();
        config.output.fail_on_skip = true;

        let settings = resolve_settings(&parse(&[]), &config, None).unwrap();
        assert_eq!(settings.pipeline.timeout, Duration::from_secs(30));
        assert!(settings.fail_on_skip);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let cli = parse(&["--format", "yaml"]);
        assert!(matches!(
            resolve_settings(&cli, &ToolConfig::default(), None),
            Err(ConfigError::InvalidSetting { key: "output.format", .. })
        ));

        let cli = parse(&["--timeout", "0"]);
        assert!(matches!(
            resolve_settings(&cli, &ToolConfig::default(), None),
            Err(ConfigError::InvalidSetting { key: "runner.timeout", .. })
        ));
    }
}
