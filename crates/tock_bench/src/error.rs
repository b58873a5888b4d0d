//! Error types for running testbenches.

use tock_sim::SimError;

/// Errors that stop a test case before its checks complete.
///
/// Output mismatches are not errors; they are collected as
/// [`Mismatch`](crate::Mismatch) records and fail the case at the end.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// The simulation itself failed (bad signal access, trace I/O, ...).
    #[error(transparent)]
    Sim(#[from] SimError),

    /// No registered test case matches the requested name.
    #[error("no test case named '{0}'")]
    UnknownTest(String),
}
