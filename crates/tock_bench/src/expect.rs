//! Non-aborting output checks.
//!
//! Each check compares an observed signal value with its expected value. A
//! mismatch is recorded and logged, and the bench keeps running; the case is
//! failed once all checks have been made.

use std::fmt;

use log::warn;
use serde::Serialize;

/// One failed check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// 1-based index of the functional step that was checked.
    pub step: u32,
    /// Name of the checked signal.
    pub signal: String,
    /// Value the check required.
    pub expected: u64,
    /// Value the model produced.
    pub actual: u64,
    /// Simulation time of the check.
    pub time: u64,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {}: {} expected {}, got {} (t={})",
            self.step, self.signal, self.expected, self.actual, self.time
        )
    }
}

/// Collects the results of every check in a test case.
#[derive(Clone, Debug, Default)]
pub struct Expectations {
    checks: usize,
    mismatches: Vec<Mismatch>,
}

impl Expectations {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a check of `signal` at `step`; returns whether it passed.
    pub fn expect_eq(
        &mut self,
        step: u32,
        signal: &str,
        expected: u64,
        actual: u64,
        time: u64,
    ) -> bool {
        self.checks += 1;
        if expected == actual {
            return true;
        }
        let mismatch = Mismatch {
            step,
            signal: signal.to_string(),
            expected,
            actual,
            time,
        };
        warn!("{mismatch}");
        self.mismatches.push(mismatch);
        false
    }

    /// Number of checks made so far.
    pub fn checks(&self) -> usize {
        self.checks
    }

    /// Failed checks in the order they were made.
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    /// Consumes the collector, returning `(checks, mismatches)`.
    pub fn into_parts(self) -> (usize, Vec<Mismatch>) {
        (self.checks, self.mismatches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_checks() {
        let mut ex = Expectations::new();
        assert!(ex.expect_eq(1, "io_out", 1, 1, 22));
        assert!(ex.expect_eq(2, "io_out", 2, 2, 24));
        assert_eq!(ex.checks(), 2);
        assert!(ex.mismatches().is_empty());
    }

    #[test]
    fn mismatches_do_not_stop_later_checks() {
        let mut ex = Expectations::new();
        assert!(!ex.expect_eq(1, "io_out", 1, 0, 22));
        assert!(ex.expect_eq(2, "io_out", 2, 2, 24));
        assert!(!ex.expect_eq(3, "io_out", 3, 5, 26));
        assert_eq!(ex.checks(), 3);
        let steps: Vec<u32> = ex.mismatches().iter().map(|m| m.step).collect();
        assert_eq!(steps, vec![1, 3]);
    }

    #[test]
    fn mismatch_display() {
        let m = Mismatch {
            step: 9,
            signal: "io_out".into(),
            expected: 1,
            actual: 0,
            time: 38,
        };
        assert_eq!(m.to_string(), "step 9: io_out expected 1, got 0 (t=38)");
    }

    #[test]
    fn into_parts() {
        let mut ex = Expectations::new();
        ex.expect_eq(1, "io_out", 1, 2, 0);
        let (checks, mismatches) = ex.into_parts();
        assert_eq!(checks, 1);
        assert_eq!(mismatches.len(), 1);
    }
}
