//! Registered test cases and the runner that executes them.
//!
//! Cases are identified as `Suite.case`. The runner can select a case by
//! exact name, by substring filter, or run all of them.

use log::info;
use tock_config::TockConfig;

use crate::counter_test;
use crate::error::BenchError;
use crate::report::TestResult;
use crate::testbench::BenchOutcome;

/// Signature of a test case body.
pub type CaseFn = fn(&TockConfig) -> Result<BenchOutcome, BenchError>;

/// A named, runnable test case.
#[derive(Clone, Copy)]
pub struct TestCase {
    /// Suite name, e.g. `CounterTest`.
    pub suite: &'static str,
    /// Case name within the suite, e.g. `count16`.
    pub name: &'static str,
    /// The case body.
    pub run: CaseFn,
}

impl TestCase {
    /// Returns `suite.name`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.suite, self.name)
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TestCase").field(&self.full_name()).finish()
    }
}

/// All test cases known to the runner.
pub fn registered_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            suite: counter_test::SUITE,
            name: "count16",
            run: counter_test::count16,
        },
        TestCase {
            suite: counter_test::SUITE,
            name: "configured",
            run: counter_test::configured,
        },
    ]
}

/// Selects cases by exact full name, or by substring of the full name.
///
/// `name` takes precedence over `filter`; with neither, every case is kept.
pub fn select_cases(cases: &[TestCase], name: Option<&str>, filter: Option<&str>) -> Vec<TestCase> {
    cases
        .iter()
        .filter(|case| {
            let full = case.full_name();
            if let Some(n) = name {
                return full == n;
            }
            if let Some(f) = filter {
                return full.contains(f);
            }
            true
        })
        .copied()
        .collect()
}

/// Looks up a registered case by full name.
pub fn find_case(name: &str) -> Result<TestCase, BenchError> {
    registered_cases()
        .into_iter()
        .find(|case| case.full_name() == name)
        .ok_or_else(|| BenchError::UnknownTest(name.to_string()))
}

/// Runs one case with `config`.
pub fn run_case(case: &TestCase, config: &TockConfig) -> TestResult {
    let name = case.full_name();
    info!("running {name}");
    TestResult::from_run(&name, (case.run)(config))
}

/// Runs cases in order, each with a fresh model.
pub fn run_cases(cases: &[TestCase], config: &TockConfig) -> Vec<TestResult> {
    cases.iter().map(|case| run_case(case, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_pass(_: &TockConfig) -> Result<BenchOutcome, BenchError> {
        Ok(BenchOutcome {
            final_time: 1,
            checks: 1,
            mismatches: Vec::new(),
        })
    }

    fn fake_cases() -> Vec<TestCase> {
        ["count16", "count32", "reset"]
            .into_iter()
            .map(|name| TestCase {
                suite: "CounterTest",
                name,
                run: fake_pass,
            })
            .collect()
    }

    #[test]
    fn counter_cases_are_registered() {
        let names: Vec<String> = registered_cases().iter().map(TestCase::full_name).collect();
        assert_eq!(names, vec!["CounterTest.count16", "CounterTest.configured"]);
    }

    #[test]
    fn select_by_name() {
        let selected = select_cases(&fake_cases(), Some("CounterTest.count32"), None);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "count32");
    }

    #[test]
    fn select_by_filter() {
        let selected = select_cases(&fake_cases(), None, Some("count"));
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn name_beats_filter() {
        let selected = select_cases(&fake_cases(), Some("CounterTest.reset"), Some("count"));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "reset");
    }

    #[test]
    fn select_all_and_none() {
        assert_eq!(select_cases(&fake_cases(), None, None).len(), 3);
        assert!(select_cases(&fake_cases(), Some("nope"), None).is_empty());
    }

    #[test]
    fn find_unknown_case() {
        assert!(matches!(
            find_case("CounterTest.count99"),
            Err(BenchError::UnknownTest(_))
        ));
        assert_eq!(find_case("CounterTest.count16").unwrap().name, "count16");
    }

    #[test]
    fn run_cases_in_order() {
        let results = run_cases(&fake_cases(), &TockConfig::default());
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["CounterTest.count16", "CounterTest.count32", "CounterTest.reset"]
        );
        assert!(results.iter().all(|r| r.passed));
    }
}
