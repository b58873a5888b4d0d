//! Process-wide simulation state shared by every model in a run.
//!
//! A [`SimContext`] owns the logical simulation time, the policy used to
//! initialise model registers at construction, and the switch that allows
//! trace sinks to attach. Time only moves forward.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How model registers are initialised before the first reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum RandReset {
    /// Every register bit starts at zero.
    #[default]
    Zeros,
    /// Every register bit starts at one.
    Ones,
    /// Registers start with pseudo-random contents drawn from `seed`.
    Random {
        /// Seed for the power-on value generator.
        seed: u64,
    },
}

/// Simulation time and global state for one run.
///
/// Exclusively owned by the test case driving the simulation; models borrow
/// it during construction and evaluation.
pub struct SimContext {
    time: u64,
    rand_reset: RandReset,
    rng: StdRng,
    trace_ever_on: bool,
}

impl SimContext {
    /// Creates a context at time zero with zeroed power-on state.
    pub fn new() -> Self {
        Self::with_rand_reset(RandReset::Zeros)
    }

    /// Creates a context at time zero using the given power-on policy.
    pub fn with_rand_reset(rand_reset: RandReset) -> Self {
        let seed = match rand_reset {
            RandReset::Random { seed } => seed,
            _ => 0,
        };
        Self {
            time: 0,
            rand_reset,
            rng: StdRng::seed_from_u64(seed),
            trace_ever_on: false,
        }
    }

    /// Returns the current simulation time in logical units.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Advances simulation time by `units`.
    pub fn time_inc(&mut self, units: u64) {
        self.time = self.time.saturating_add(units);
    }

    /// Returns the power-on policy of this context.
    pub fn rand_reset(&self) -> RandReset {
        self.rand_reset
    }

    /// Produces the power-on value of a `width`-bit register.
    pub fn power_on_value(&mut self, width: u32) -> u64 {
        let mask = crate::signal::width_mask(width);
        match self.rand_reset {
            RandReset::Zeros => 0,
            RandReset::Ones => mask,
            RandReset::Random { .. } => self.rng.gen::<u64>() & mask,
        }
    }

    /// Allows trace sinks to attach to models of this context.
    pub fn set_trace_ever_on(&mut self, on: bool) {
        self.trace_ever_on = on;
    }

    /// Returns whether tracing has been enabled.
    pub fn trace_ever_on(&self) -> bool {
        self.trace_ever_on
    }
}

impl Default for SimContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SimContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimContext")
            .field("time", &self.time)
            .field("rand_reset", &self.rand_reset)
            .field("trace_ever_on", &self.trace_ever_on)
            .finish()
    }
}
