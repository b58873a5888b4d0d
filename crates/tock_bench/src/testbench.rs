//! Clocked testbench around a single model.
//!
//! A [`Testbench`] exclusively owns the simulation context, the model under
//! test, an optional trace sink and the check results for one test case.
//! [`clock_step`](Testbench::clock_step) drives one full clock period as two
//! half-cycles (clock low, then high), advancing time before each evaluation
//! and sampling the trace after it.

#[cfg(feature = "waveform")]
use std::path::Path;

use log::{debug, warn};
use tock_sim::{Model, SimContext, SimError};
#[cfg(feature = "waveform")]
use tock_sim::TraceSink;

use crate::expect::{Expectations, Mismatch};

/// Result of a finished testbench run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchOutcome {
    /// Simulation time when the bench finished.
    pub final_time: u64,
    /// Number of checks made.
    pub checks: usize,
    /// Failed checks.
    pub mismatches: Vec<Mismatch>,
}

impl BenchOutcome {
    /// Returns whether every check passed.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Input the bench toggles on every half-cycle.
const CLOCK: &str = "clock";

/// Drives one model through clock steps and records checks.
pub struct Testbench<M: Model> {
    ctx: SimContext,
    dut: M,
    time_step: u64,
    expectations: Expectations,
    #[cfg(feature = "waveform")]
    trace: Option<TraceSink>,
}

impl<M: Model> Testbench<M> {
    /// Wraps `dut`, built in `ctx`, whose clock input is named `clock`.
    pub fn new(ctx: SimContext, dut: M) -> Self {
        Self {
            ctx,
            dut,
            time_step: 1,
            expectations: Expectations::new(),
            #[cfg(feature = "waveform")]
            trace: None,
        }
    }

    /// Advances time by `units` before each half-cycle instead of 1.
    pub fn with_time_step(mut self, units: u64) -> Self {
        self.time_step = units.max(1);
        self
    }

    /// Starts recording a waveform of the model to `path`.
    ///
    /// The trace stays open until [`finish`](Testbench::finish) or until the
    /// testbench is dropped, whichever comes first.
    #[cfg(feature = "waveform")]
    pub fn open_trace(&mut self, path: &Path, depth: u32, timescale: &str) -> Result<(), SimError> {
        self.ctx.set_trace_ever_on(true);
        let mut sink = TraceSink::with_timescale(timescale);
        sink.attach(&self.ctx, &self.dut, depth)?;
        sink.open(path)?;
        self.trace = Some(sink);
        Ok(())
    }

    /// Returns whether a waveform is being recorded.
    pub fn is_tracing(&self) -> bool {
        #[cfg(feature = "waveform")]
        {
            self.trace.as_ref().is_some_and(TraceSink::is_open)
        }
        #[cfg(not(feature = "waveform"))]
        {
            false
        }
    }

    /// Runs one full clock period: two time advances and two evaluations.
    pub fn clock_step(&mut self) -> Result<(), SimError> {
        for level in 0..=1u64 {
            self.ctx.time_inc(self.time_step);
            self.dut.pin(CLOCK, level)?;
            self.dut.eval(&self.ctx)?;
            self.sample()?;
        }
        Ok(())
    }

    /// Runs `count` clock steps.
    pub fn clock_steps(&mut self, count: u32) -> Result<(), SimError> {
        for _ in 0..count {
            self.clock_step()?;
        }
        Ok(())
    }

    #[cfg(feature = "waveform")]
    fn sample(&mut self) -> Result<(), SimError> {
        if let Some(trace) = self.trace.as_mut() {
            trace.dump(self.ctx.time(), &self.dut)?;
        }
        Ok(())
    }

    #[cfg(not(feature = "waveform"))]
    fn sample(&mut self) -> Result<(), SimError> {
        Ok(())
    }

    #[cfg(feature = "waveform")]
    fn close_trace(&mut self) -> Result<(), SimError> {
        match self.trace.take() {
            Some(mut trace) => trace.close(),
            None => Ok(()),
        }
    }

    #[cfg(not(feature = "waveform"))]
    fn close_trace(&mut self) -> Result<(), SimError> {
        Ok(())
    }

    /// Evaluates the model without touching time or the clock.
    pub fn eval(&mut self) -> Result<(), SimError> {
        self.dut.eval(&self.ctx)
    }

    /// Drives an input signal by name.
    pub fn set(&mut self, name: &str, value: u64) -> Result<(), SimError> {
        self.dut.pin(name, value)
    }

    /// Reads a signal by name.
    pub fn read(&self, name: &str) -> Result<u64, SimError> {
        self.dut.read(name)
    }

    /// Reads `signal` and records a check against `expected` for `step`.
    pub fn expect_eq(&mut self, step: u32, signal: &str, expected: u64) -> Result<bool, SimError> {
        let actual = self.dut.read(signal)?;
        let time = self.ctx.time();
        Ok(self
            .expectations
            .expect_eq(step, signal, expected, actual, time))
    }

    /// Current simulation time.
    pub fn time(&self) -> u64 {
        self.ctx.time()
    }

    /// The model under test.
    pub fn dut(&self) -> &M {
        &self.dut
    }

    /// Runs `body` against the bench.
    ///
    /// If `body` fails, the trace is closed and the model finalized before the
    /// error is returned.
    pub fn run_or_finalize<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, SimError>,
    ) -> Result<T, SimError> {
        let result = body(self);
        if result.is_err() {
            self.abort();
        }
        result
    }

    fn abort(&mut self) {
        if let Err(e) = self.close_trace() {
            warn!("failed to close trace: {e}");
        }
        if !self.dut.is_finalized() {
            if let Err(e) = self.dut.finalize() {
                warn!("failed to finalize {}: {e}", self.dut.name());
            }
        }
        debug!("{} aborted at t={}", self.dut.name(), self.ctx.time());
    }

    /// Closes the trace, finalizes the model and returns the outcome.
    pub fn finish(mut self) -> Result<BenchOutcome, SimError> {
        self.close_trace()?;
        self.dut.finalize()?;
        let final_time = self.ctx.time();
        debug!(
            "{} finalized at t={final_time}: {} check(s), {} mismatch(es)",
            self.dut.name(),
            self.expectations.checks(),
            self.expectations.mismatches().len()
        );
        let (checks, mismatches) = self.expectations.into_parts();
        Ok(BenchOutcome {
            final_time,
            checks,
            mismatches,
        })
    }
}
