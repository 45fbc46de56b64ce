//! Output Formatting
//!
//! Terminal-friendly sweep summary with status icons (✓/✗/💥/⊘), per-run
//! timing metrics, produced images and the skip list.

use crate::report::{RunStatus, SweepReport};

/// Format a sweep report for terminal display
pub fn format_human_output(report: &SweepReport) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("hashbench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for run in &report.runs {
        let status_icon = match run.status {
            RunStatus::Succeeded => "✓",
            RunStatus::ExecutionFailed => "✗",
            RunStatus::IngestFailed => "💥",
            RunStatus::Cancelled => "⊘",
        };
        output.push_str(&format!("  {} {}\n", status_icon, run.label));

        if let Some(m) = &run.metrics {
            output.push_str(&format!(
                "      mean: {:.9} s  median: {:.9} s  stddev: {:.9} s\n",
                m.mean_s, m.median_s, m.std_dev_s
            ));
            output.push_str(&format!(
                "      min: {:.9} s  max: {:.9} s  samples: {}\n",
                m.min_s, m.max_s, m.samples
            ));
            output.push_str(&format!(
                "      p95: {:.9} s  p99: {:.9} s  total: {:.6} s\n",
                m.p95_s, m.p99_s, m.total_s
            ));
            if let Some(throughput) = m.throughput_ops_sec {
                output.push_str(&format!("      throughput: {:.2} ops/sec\n", throughput));
            }
        }

        for plot in &run.plots {
            output.push_str(&format!("      plot: {}\n", plot.display()));
        }
        if let Some(failure) = &run.failure {
            output.push_str(&format!("      error: {}\n", failure.message));
        }
        for failure in &run.render_failures {
            output.push_str(&format!("      render error: {}\n", failure.message));
        }

        output.push('\n');
    }

    if let Some(path) = &report.combined_plot {
        output.push_str(&format!(
            "Combined plot: {} ({} curves)\n",
            path.display(),
            report.combined_curves.len()
        ));
    }
    if let Some(failure) = &report.combined_failure {
        output.push_str(&format!("Combined plot failed: {}\n", failure.message));
    }

    let skipped: Vec<_> = report.skipped().collect();
    if !skipped.is_empty() {
        output.push_str("\nSkipped\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for run in skipped {
            let reason = run
                .failure
                .as_ref()
                .map(|f| format!("{}: {}", f.kind, f.message))
                .unwrap_or_default();
            output.push_str(&format!("  ⊘ {} ({})\n", run.label, reason));
        }
    }

    output.push_str("\nSummary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Total: {}  Succeeded: {}  Execution failures: {}  Ingest failures: {}  Cancelled: {}\n",
        report.summary.total_runs,
        report.summary.succeeded,
        report.summary.execution_failures,
        report.summary.ingest_failures,
        report.summary.cancelled
    ));
    if report.summary.render_failures > 0 {
        output.push_str(&format!(
            "  Render failures: {}\n",
            report.summary.render_failures
        ));
    }
    output.push_str(&format!(
        "  Duration: {:.2} ms\n",
        report.summary.total_duration_ms
    ));

    output
}
