//! The capability interface every simulation model implements.
//!
//! Generated models expose typed public fields for direct access; [`Model`]
//! adds name-based access so testbenches and trace sinks can drive any model
//! without knowing its concrete type.

use crate::context::SimContext;
use crate::error::SimError;
use crate::signal::{SignalDirection, SignalId, SignalInfo};

/// A cycle-accurate simulation model.
pub trait Model {
    /// Name of the model's top module.
    fn name(&self) -> &str;

    /// The model's signal table, indexed by [`SignalId`].
    fn signals(&self) -> &[SignalInfo];

    /// Reads the current value of a signal.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not an index into [`signals`](Model::signals).
    fn read_id(&self, id: SignalId) -> u64;

    /// Stores `value` into an input signal without any checks.
    ///
    /// Callers go through [`pin`](Model::pin), which validates direction
    /// and width first.
    fn write_input(&mut self, id: SignalId, value: u64);

    /// Propagates the logic for the current input values.
    fn eval(&mut self, ctx: &SimContext) -> Result<(), SimError>;

    /// Runs end-of-simulation work. Further `eval` or `pin` calls fail.
    fn finalize(&mut self) -> Result<(), SimError>;

    /// Returns whether [`finalize`](Model::finalize) has run.
    fn is_finalized(&self) -> bool;

    /// Looks up a signal by leaf name or full dotted name.
    fn find_signal(&self, name: &str) -> Result<&SignalInfo, SimError> {
        self.signals()
            .iter()
            .find(|s| s.name == name)
            .or_else(|| self.signals().iter().find(|s| s.full_name() == name))
            .ok_or_else(|| SimError::UnknownSignal {
                name: name.to_string(),
            })
    }

    /// Reads a signal by name.
    fn read(&self, name: &str) -> Result<u64, SimError> {
        let id = self.find_signal(name)?.id;
        Ok(self.read_id(id))
    }

    /// Drives an input signal by name.
    fn pin(&mut self, name: &str, value: u64) -> Result<(), SimError> {
        if self.is_finalized() {
            return Err(SimError::Finalized {
                model: self.name().to_string(),
            });
        }
        let info = self.find_signal(name)?;
        if info.direction != SignalDirection::Input {
            return Err(SimError::NotAnInput {
                name: info.name.clone(),
            });
        }
        if !info.fits(value) {
            return Err(SimError::ValueTooWide {
                name: info.name.clone(),
                value,
                width: info.width,
            });
        }
        let id = info.id;
        self.write_input(id, value);
        Ok(())
    }
}
