//! Cycle-stepped simulation runtime for Tock.
//!
//! This crate holds the pieces a testbench drives: a [`SimContext`] that owns
//! logical time, the [`Model`] capability trait, the generated [`Counter`]
//! model, and VCD waveform output.
//!
//! # Usage
//!
//! ```ignore
//! use tock_sim::{Counter, SimContext};
//!
//! let mut ctx = SimContext::new();
//! let mut dut = Counter::new(&mut ctx);
//! for level in 0..=1 {
//!     ctx.time_inc(1);
//!     dut.clock = level;
//!     dut.eval(&ctx)?;
//! }
//! assert_eq!(dut.io_out, 1);
//! dut.finalize()?;
//! ```
//!
//! # Modules
//!
//! - `context`: simulation time and power-on policy
//! - `signal`: signal metadata tables
//! - `model`: the `Model` trait
//! - `counter`: the generated counter model
//! - `waveform`: VCD recorder
//! - `trace`: file-backed trace sink (feature `waveform`)

#![warn(missing_docs)]

pub mod context;
pub mod counter;
pub mod error;
pub mod model;
pub mod signal;
#[cfg(feature = "waveform")]
pub mod trace;
pub mod waveform;

pub use context::{RandReset, SimContext};
pub use counter::{Counter, DEFAULT_COUNTER_WIDTH, MAX_COUNTER_WIDTH};
pub use error::SimError;
pub use model::Model;
pub use signal::{width_mask, SignalDirection, SignalId, SignalInfo};
#[cfg(feature = "waveform")]
pub use trace::TraceSink;
pub use waveform::{VcdRecorder, WaveformRecorder};
