//! Testbench harness for the Tock counter model.
//!
//! [`Testbench`] wraps a context and a model and provides the two-phase clock
//! step, name-based signal access and non-aborting checks. The
//! [`counter_test`] module builds the reset-then-count bench on top of it,
//! and [`registry`] exposes the resulting cases (`CounterTest.count16` and
//! `CounterTest.configured`) to runners.
//!
//! # Usage
//!
//! ```ignore
//! use tock_bench::{registry, Report};
//! use tock_config::TockConfig;
//!
//! let cases = registry::registered_cases();
//! let report = Report::new(registry::run_cases(&cases, &TockConfig::default()));
//! assert_eq!(report.summary.failed, 0);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod expect;
pub mod registry;
pub mod report;
pub mod testbench;

pub use counter_test::{run_counter, CounterPlan, CounterRun};
pub use error::BenchError;
pub use expect::{Expectations, Mismatch};
pub use registry::{find_case, registered_cases, run_case, run_cases, select_cases, TestCase};
pub use report::{Report, Summary, TestResult};
pub use testbench::{BenchOutcome, Testbench};
