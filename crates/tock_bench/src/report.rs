//! Per-case results and run summaries.

use serde::Serialize;

use crate::error::BenchError;
use crate::expect::Mismatch;
use crate::testbench::BenchOutcome;

/// Result of running one registered test case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestResult {
    /// Full case name, e.g. `CounterTest.count16`.
    pub name: String,
    /// Whether the case ran to completion without mismatches.
    pub passed: bool,
    /// Simulation time when the case ended (0 if it errored).
    pub final_time: u64,
    /// Number of checks made.
    pub checks: usize,
    /// Failed checks.
    pub mismatches: Vec<Mismatch>,
    /// Error that stopped the case early, if any.
    pub error: Option<String>,
}

impl TestResult {
    /// Builds a result from the return value of a case function.
    pub fn from_run(name: &str, run: Result<BenchOutcome, BenchError>) -> Self {
        match run {
            Ok(outcome) => Self {
                name: name.to_string(),
                passed: outcome.passed(),
                final_time: outcome.final_time,
                checks: outcome.checks,
                mismatches: outcome.mismatches,
                error: None,
            },
            Err(e) => Self {
                name: name.to_string(),
                passed: false,
                final_time: 0,
                checks: 0,
                mismatches: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }

    /// Human-readable lines describing this result.
    pub fn render(&self) -> Vec<String> {
        if self.passed {
            return vec![format!(
                "   PASS  {} ({} checks, t={})",
                self.name, self.checks, self.final_time
            )];
        }
        if let Some(err) = &self.error {
            return vec![format!("   FAIL  {}: {err}", self.name)];
        }
        let mut lines = vec![format!(
            "   FAIL  {}: {} of {} check(s) failed",
            self.name,
            self.mismatches.len(),
            self.checks
        )];
        lines.extend(self.mismatches.iter().map(|m| format!("         {m}")));
        lines
    }
}

/// Pass/fail counts over a set of results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Cases that passed.
    pub passed: usize,
    /// Cases that failed or errored.
    pub failed: usize,
    /// All cases run.
    pub total: usize,
}

impl Summary {
    /// Counts the results.
    pub fn from_results(results: &[TestResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            passed,
            failed: results.len() - passed,
            total: results.len(),
        }
    }

    /// Process exit code for this summary: 0 when nothing failed.
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            1
        } else {
            0
        }
    }

    /// One-line summary text.
    pub fn render(&self) -> String {
        format!(
            "   Result: {} passed, {} failed out of {} test case(s)",
            self.passed, self.failed, self.total
        )
    }
}

/// Results plus summary, the machine-readable form of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Per-case results in run order.
    pub results: Vec<TestResult>,
    /// Counts over `results`.
    pub summary: Summary,
}

impl Report {
    /// Builds a report from results.
    pub fn new(results: Vec<TestResult>) -> Self {
        let summary = Summary::from_results(&results);
        Self { results, summary }
    }
}
