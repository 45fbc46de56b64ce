//! Sweep Planner
//!
//! Selects which configured runs to execute. Filtering is a regex match on
//! the run label; runs keep the order they have in the sweep file.

use hashbench_core::BenchmarkSpec;

/// Execution plan for a sweep
#[derive(Debug, Clone, Default)]
pub struct ExecutionPlan {
    /// Runs to execute, in sweep-file order
    pub benchmarks: Vec<BenchmarkSpec>,
    /// Configured runs the filter excluded
    pub filtered_out: usize,
}

/// Build an execution plan from the configured runs
pub fn build_plan(
    benchmarks: impl IntoIterator<Item = BenchmarkSpec>,
    filter: Option<&regex::Regex>,
) -> ExecutionPlan {
    let mut plan = ExecutionPlan::default();
    for spec in benchmarks {
        if filter.is_none_or(|re| re.is_match(&spec.label())) {
            plan.benchmarks.push(spec);
        } else {
            plan.filtered_out += 1;
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn spec(mode: &str, probe: &str, hash: &str) -> BenchmarkSpec {
        BenchmarkSpec::new(mode, probe, hash, 1000, 0.75, None)
    }

    fn sweep() -> Vec<BenchmarkSpec> {
        vec![
            spec("lookup", "linear", "djb2"),
            spec("insert", "quadratic", "fnv1a"),
            spec("insert", "linear", "crc32"),
        ]
    }

    #[test]
    fn test_no_filter_keeps_file_order() {
        let plan = build_plan(sweep(), None);

        assert_eq!(plan.benchmarks.len(), 3);
        assert_eq!(plan.filtered_out, 0);
        assert_eq!(plan.benchmarks[0].mode, "lookup");
        assert_eq!(plan.benchmarks[2].hash, "crc32");
    }

    #[test]
    fn test_regex_filter_on_label() {
        let re = Regex::new("^insert_").unwrap();
        let plan = build_plan(sweep(), Some(&re));

        assert_eq!(plan.benchmarks.len(), 2);
        assert_eq!(plan.filtered_out, 1);
        assert!(plan.benchmarks.iter().all(|b| b.mode == "insert"));
        assert_eq!(plan.benchmarks[0].probe, "quadratic");
    }

    #[test]
    fn test_filter_matching_nothing() {
        let re = Regex::new("cuckoo").unwrap();
        let plan = build_plan(sweep(), Some(&re));
        assert!(plan.benchmarks.is_empty());
        assert_eq!(plan.filtered_out, 3);
    }
}
