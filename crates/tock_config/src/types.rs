//! Configuration types deserialized from `tock.toml`.

use serde::{Deserialize, Serialize};

/// The top-level configuration parsed from `tock.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TockConfig {
    /// Reset and functional phase lengths.
    pub bench: BenchSettings,
    /// Parameters of the counter model under test.
    pub counter: CounterSettings,
    /// Simulation context settings.
    pub sim: SimSettings,
    /// Waveform tracing settings.
    pub trace: TraceSettings,
}

/// Phase lengths of `CounterTest.configured`, in clock steps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchSettings {
    /// Clock steps with reset asserted.
    pub reset_cycles: u32,
    /// Clock steps checked after reset is released.
    pub steps: u32,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            reset_cycles: 10,
            steps: 16,
        }
    }
}

/// Counter model parameters used by `CounterTest.configured`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterSettings {
    /// Register width in bits.
    pub width: u32,
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self { width: 3 }
    }
}

/// Initial register contents before the first reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RandResetPolicy {
    /// All zeros.
    #[default]
    Zeros,
    /// All ones.
    Ones,
    /// Seeded pseudo-random bits.
    Random,
}

/// Simulation context settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimSettings {
    /// Power-on register policy.
    pub rand_reset: RandResetPolicy,
    /// Seed used when `rand_reset = "random"`.
    pub seed: u64,
    /// Logical time units advanced before each half-cycle evaluation.
    pub time_step: u64,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            rand_reset: RandResetPolicy::Zeros,
            seed: 0,
            time_step: 1,
        }
    }
}

/// Waveform tracing settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceSettings {
    /// Whether to record a waveform.
    pub enabled: bool,
    /// Output path of the VCD file.
    pub path: String,
    /// Number of hierarchy levels recorded.
    pub depth: u32,
    /// VCD `$timescale`, e.g. `1ns` or `100ps`.
    pub timescale: String,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "wave.vcd".to_string(),
            depth: 99,
            timescale: "1ns".to_string(),
        }
    }
}
