#![warn(missing_docs)]
//! hashbench Report - Sweep Reporting
//!
//! Generates the end-of-sweep output formats:
//! - Human (terminal summary)
//! - JSON (machine-readable)
//! - CSV (spreadsheet-compatible)
//!
//! Also hosts the per-run console statistics printed while the sweep runs.

mod csv_export;
mod human;
mod json;
mod report;
mod stats;

pub use csv_export::generate_csv_report;
pub use human::format_human_output;
pub use json::generate_json_report;
pub use report::{
    FailureInfo, ReportMeta, RunMetrics, RunRecord, RunStatus, SCHEMA_VERSION, SweepReport,
    SweepSummary, SystemInfo,
};
pub use stats::{StatsReporter, format_statistics, print_statistics};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render a report in the chosen format
pub fn render_report(report: &SweepReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Human => Ok(format_human_output(report)),
        OutputFormat::Json => generate_json_report(report).map_err(|e| e.to_string()),
        OutputFormat::Csv => generate_csv_report(report).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hashbench_core::BenchmarkSpec;
    use hashbench_stats::describe;
    use std::path::PathBuf;

    fn sample_report() -> SweepReport {
        let meta = ReportMeta {
            schema_version: SCHEMA_VERSION,
            version: "0.1.0".to_string(),
            timestamp: Utc::now(),
            executable: Some(PathBuf::from("bin/benchmark_hashtab")),
            git_commit: None,
            git_branch: None,
            system: SystemInfo {
                os: "linux".to_string(),
                arch: "x86_64".to_string(),
                cpu: "Unknown".to_string(),
                cpu_cores: 4,
                memory_gb: 8.0,
            },
        };

        let spec = BenchmarkSpec::new("insert", "linear", "djb2", 1000, 0.75, None);
        let mut ok = RunRecord::pending(
            spec.label(),
            Some(spec.clone()),
            PathBuf::from("results/insert_linear_djb2_0.75.csv"),
        );
        ok.metrics = Some(RunMetrics::from(&describe(&[0.1, 0.2, 0.3])));
        ok.plots
            .push(PathBuf::from("plots/insert_linear_djb2_0.75_cumulative.png"));

        let failed = RunRecord::pending("broken", None, PathBuf::from("results/broken.csv")).skip(
            RunStatus::ExecutionFailed,
            FailureInfo::new("non_zero_exit", "exited with status 3"),
        );

        SweepReport::new(
            meta,
            vec![ok, failed],
            Some(PathBuf::from("plots/all_cumulative.png")),
            None,
            12.5,
        )
        .with_combined_curves(vec!["insert_linear_djb2_0.75".to_string()])
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_summary_counts() {
        let report = sample_report();
        assert_eq!(report.summary.total_runs, 2);
        assert_eq!(report.summary.succeeded, 1);
        assert_eq!(report.summary.execution_failures, 1);
        assert_eq!(report.summary.skipped(), 1);
        assert!(report.summary.has_skips());
        assert_eq!(report.skipped().count(), 1);
    }

    #[test]
    fn test_json_round_trip() {
        let report = sample_report();
        let json = generate_json_report(&report).unwrap();
        let parsed: SweepReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.runs.len(), 2);
        assert_eq!(parsed.runs[1].status, RunStatus::ExecutionFailed);
        assert_eq!(parsed.summary, report.summary);
        assert_eq!(parsed.combined_curves, vec!["insert_linear_djb2_0.75"]);
        assert!(json.contains("\"execution_failed\""));
    }

    #[test]
    fn test_csv_has_row_per_run() {
        let csv = generate_csv_report(&sample_report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("label,status,mode"));
        assert!(lines[1].starts_with("insert_linear_djb2_0.75,succeeded,insert,linear,djb2,1000,0.75,3,"));
        assert!(lines[2].starts_with("broken,execution_failed,,,,,,"));
        assert!(lines[2].ends_with("exited with status 3"));
    }

    #[test]
    fn test_human_output_lists_skips() {
        let text = format_human_output(&sample_report());
        assert!(text.contains("✓ insert_linear_djb2_0.75"));
        assert!(text.contains("✗ broken"));
        assert!(text.contains("Skipped"));
        assert!(text.contains("non_zero_exit: exited with status 3"));
        assert!(text.contains("Combined plot: plots/all_cumulative.png"));
    }
}
