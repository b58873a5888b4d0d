//! Signal metadata exposed by simulation models.
//!
//! Models publish a table of [`SignalInfo`] entries so that generic code
//! (testbenches, trace sinks) can find signals by name, check direction and
//! width, and walk the scope hierarchy.

use serde::{Deserialize, Serialize};

/// Index of a signal in its model's signal table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SignalId(u32);

impl SignalId {
    /// Creates a `SignalId` from a raw index.
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// Port direction of a signal, or `Internal` for non-port state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    /// Driven by the testbench.
    Input,
    /// Driven by the model.
    Output,
    /// Register or wire inside the model, visible only to tracing.
    Internal,
}

/// Description of one signal in a model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalInfo {
    /// Position in the model's signal table.
    pub id: SignalId,
    /// Leaf name, e.g. `io_out`.
    pub name: String,
    /// Dot-separated scope path, e.g. `TOP.Counter`.
    pub scope: String,
    /// Width in bits.
    pub width: u32,
    /// Port direction.
    pub direction: SignalDirection,
}

impl SignalInfo {
    /// Number of hierarchy levels in the signal's scope (`TOP` is 1).
    pub fn depth(&self) -> u32 {
        self.scope.split('.').filter(|s| !s.is_empty()).count() as u32
    }

    /// Returns the scope split into its components.
    pub fn scope_path(&self) -> Vec<&str> {
        self.scope.split('.').filter(|s| !s.is_empty()).collect()
    }

    /// Returns `scope.name`.
    pub fn full_name(&self) -> String {
        if self.scope.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.scope, self.name)
        }
    }

    /// Returns whether `value` is representable in this signal's width.
    pub fn fits(&self, value: u64) -> bool {
        value & !width_mask(self.width) == 0
    }
}

/// Returns a mask with the low `width` bits set.
pub fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}
