//! Console Statistics
//!
//! Prints the per-run `describe` table as soon as a run is ingested.

use hashbench_core::RunResult;
use hashbench_stats::{DescriptiveStats, describe};
use std::io::{self, Write};

/// Writes descriptive statistics for each ingested run
pub struct StatsReporter<W: Write> {
    out: W,
}

impl StatsReporter<io::Stdout> {
    /// Reporter writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StatsReporter<W> {
    /// Reporter writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Compute and print statistics for a run's time column
    pub fn report(&mut self, run: &RunResult) -> io::Result<DescriptiveStats> {
        let stats = describe(&run.times());
        self.out
            .write_all(format_statistics(run.label(), &stats).as_bytes())?;
        self.out.flush()?;
        Ok(stats)
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Print statistics for a run to standard output
pub fn print_statistics(run: &RunResult) -> io::Result<DescriptiveStats> {
    StatsReporter::stdout().report(run)
}

/// Render the statistics block for one run
pub fn format_statistics(label: &str, stats: &DescriptiveStats) -> String {
    let rows = [
        ("mean", stats.mean),
        ("std", stats.std_dev),
        ("min", stats.min),
        ("50%", stats.median),
        ("95%", stats.p95),
        ("max", stats.max),
    ];

    let mut output = format!("Statistics for {}:\n", label);
    output.push_str(&format!("  {:<6} {:>16}\n", "count", stats.count));
    for (name, value) in rows {
        output.push_str(&format!("  {:<6} {:>16.9}\n", name, value));
    }
    output.push_str(&format!(
        "99th percentile for {}: {:.6} sec\n\n",
        label, stats.p99
    ));
    output
}
