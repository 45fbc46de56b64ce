//! CSV Output
//!
//! One row per benchmark entry, spreadsheet friendly. Skipped runs keep their
//! row with empty metric cells and the failure message.

use crate::report::SweepReport;

const HEADER: [&str; 16] = [
    "label",
    "status",
    "mode",
    "probe",
    "hash",
    "num_tests",
    "load_factor",
    "samples",
    "mean_s",
    "std_dev_s",
    "min_s",
    "median_s",
    "p95_s",
    "p99_s",
    "max_s",
    "failure",
];

/// Generate a CSV report
pub fn generate_csv_report(report: &SweepReport) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADER)?;

    for run in &report.runs {
        let spec = run.spec.as_ref();
        let param = |f: fn(&hashbench_core::BenchmarkSpec) -> String| spec.map(f).unwrap_or_default();

        let mut row = vec![
            run.label.clone(),
            run.status.as_str().to_string(),
            param(|s| s.mode.clone()),
            param(|s| s.probe.clone()),
            param(|s| s.hash.clone()),
            param(|s| s.num_tests.to_string()),
            param(|s| s.load_factor_arg()),
        ];

        match &run.metrics {
            Some(m) => {
                row.push(m.samples.to_string());
                for value in [
                    m.mean_s, m.std_dev_s, m.min_s, m.median_s, m.p95_s, m.p99_s, m.max_s,
                ] {
                    row.push(format!("{:.9}", value));
                }
            }
            None => row.extend(std::iter::repeat_n(String::new(), 8)),
        }

        row.push(
            run.failure
                .as_ref()
                .map(|f| f.message.clone())
                .unwrap_or_default(),
        );
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
