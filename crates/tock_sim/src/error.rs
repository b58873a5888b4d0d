//! Simulation error types.
//!
//! Everything that can go wrong while building, driving, or tracing a model
//! is a variant of [`SimError`].

use std::io;
use std::path::PathBuf;

/// Errors raised by models, the simulation context, and trace sinks.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// No signal with the given name exists on the model.
    #[error("unknown signal '{name}'")]
    UnknownSignal {
        /// The requested signal name.
        name: String,
    },

    /// A write targeted a signal that is not a model input.
    #[error("signal '{name}' is not an input")]
    NotAnInput {
        /// The signal that was written.
        name: String,
    },

    /// A value does not fit in the bit width of the target signal.
    #[error("value {value} does not fit in {width}-bit signal '{name}'")]
    ValueTooWide {
        /// The signal that was written.
        name: String,
        /// The rejected value.
        value: u64,
        /// Width of the signal in bits.
        width: u32,
    },

    /// A model was requested with a width it cannot represent.
    #[error("unsupported width {width} (expected 1..={max})")]
    InvalidWidth {
        /// The requested width.
        width: u32,
        /// The largest width the model supports.
        max: u32,
    },

    /// The model was used after [`finalize`](crate::Model::finalize).
    #[error("model '{model}' has already been finalized")]
    Finalized {
        /// Name of the finalized model.
        model: String,
    },

    /// A trace sink was attached without enabling tracing on the context.
    #[error("tracing is not enabled on the simulation context")]
    TracingDisabled,

    /// A sample was requested from a trace sink that has no open file.
    #[error("trace sink is not open")]
    TraceNotOpen,

    /// The trace sink was attached or opened twice.
    #[error("trace sink is already open")]
    TraceAlreadyOpen,

    /// The waveform file could not be created.
    #[error("failed to open trace file {}: {source}", path.display())]
    TraceOpen {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Writing waveform data failed.
    #[error("waveform I/O error: {0}")]
    WaveformIo(#[from] io::Error),

    /// A recorder was asked to emit a timestamp earlier than the previous one.
    #[error("time went backwards: {time} < {previous}")]
    NonMonotonicTime {
        /// The last emitted timestamp.
        previous: u64,
        /// The rejected timestamp.
        time: u64,
    },

    /// A recorder received a signal it never registered.
    #[error("invalid signal reference: {reason}")]
    InvalidSignalRef {
        /// Description of why the reference is invalid.
        reason: String,
    },
}
