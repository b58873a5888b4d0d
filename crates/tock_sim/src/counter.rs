//! Generated model of the `Counter` circuit.
//!
//! The circuit is a wraparound up-counter with a synchronous reset:
//!
//! ```text
//! always @(posedge clock)
//!   if (reset) count <= 0;
//!   else       count <= count + 1;
//! assign io_out = count;
//! ```
//!
//! Ports are public fields so testbenches can drive the model directly, the
//! same way they would drive any generated model. The register width is a
//! construction parameter; the default is 3 bits.

use log::trace;

use crate::context::SimContext;
use crate::error::SimError;
use crate::model::Model;
use crate::signal::{width_mask, SignalDirection, SignalId, SignalInfo};

/// Default register width of the counter.
pub const DEFAULT_COUNTER_WIDTH: u32 = 3;

/// Widest counter the model supports.
pub const MAX_COUNTER_WIDTH: u32 = 32;

const CLOCK: SignalId = SignalId::from_raw(0);
const RESET: SignalId = SignalId::from_raw(1);
const IO_OUT: SignalId = SignalId::from_raw(2);
const COUNT: SignalId = SignalId::from_raw(3);

/// Simulation model of the `Counter` module.
#[derive(Debug)]
pub struct Counter {
    /// Clock input. Only bit 0 is significant.
    pub clock: u8,
    /// Synchronous active-high reset input. Only bit 0 is significant.
    pub reset: u8,
    /// Counter output, valid after [`eval`](Counter::eval).
    pub io_out: u32,
    count: u32,
    clock_last: u8,
    width: u32,
    last_edge: Option<u64>,
    finalized: bool,
    signals: Vec<SignalInfo>,
}

impl Counter {
    /// Builds a 3-bit counter in `ctx`.
    pub fn new(ctx: &mut SimContext) -> Self {
        Self::build(ctx, DEFAULT_COUNTER_WIDTH)
    }

    /// Builds a counter of the given width in `ctx`.
    pub fn with_width(ctx: &mut SimContext, width: u32) -> Result<Self, SimError> {
        if width == 0 || width > MAX_COUNTER_WIDTH {
            return Err(SimError::InvalidWidth {
                width,
                max: MAX_COUNTER_WIDTH,
            });
        }
        Ok(Self::build(ctx, width))
    }

    fn build(ctx: &mut SimContext, width: u32) -> Self {
        let count = ctx.power_on_value(width) as u32;
        let port = |id: SignalId, name: &str, width: u32, direction| SignalInfo {
            id,
            name: name.to_string(),
            scope: "TOP".to_string(),
            width,
            direction,
        };
        let signals = vec![
            port(CLOCK, "clock", 1, SignalDirection::Input),
            port(RESET, "reset", 1, SignalDirection::Input),
            port(IO_OUT, "io_out", width, SignalDirection::Output),
            SignalInfo {
                id: COUNT,
                name: "count".to_string(),
                scope: "TOP.Counter".to_string(),
                width,
                direction: SignalDirection::Internal,
            },
        ];
        Self {
            clock: 0,
            reset: 0,
            io_out: count,
            count,
            clock_last: 0,
            width,
            last_edge: None,
            finalized: false,
            signals,
        }
    }

    /// Register width in bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Simulation time of the most recent rising clock edge, if any.
    pub fn last_edge(&self) -> Option<u64> {
        self.last_edge
    }

    /// Propagates one evaluation of the circuit.
    ///
    /// The register updates only on a 0 → 1 transition of `clock` since the
    /// previous evaluation; evaluating twice at the same clock level is a no-op
    /// for the register.
    pub fn eval(&mut self, ctx: &SimContext) -> Result<(), SimError> {
        if self.finalized {
            return Err(SimError::Finalized {
                model: "Counter".to_string(),
            });
        }
        let clock = self.clock & 1;
        if clock == 1 && self.clock_last == 0 {
            let mask = width_mask(self.width) as u32;
            self.count = if self.reset & 1 == 1 {
                0
            } else {
                self.count.wrapping_add(1) & mask
            };
            self.last_edge = Some(ctx.time());
            trace!("Counter posedge at {}: count={}", ctx.time(), self.count);
        }
        self.clock_last = clock;
        self.io_out = self.count;
        Ok(())
    }

    /// Marks the model finished.
    pub fn finalize(&mut self) -> Result<(), SimError> {
        self.finalized = true;
        Ok(())
    }
}

impl Model for Counter {
    fn name(&self) -> &str {
        "Counter"
    }

    fn signals(&self) -> &[SignalInfo] {
        &self.signals
    }

    fn read_id(&self, id: SignalId) -> u64 {
        match id {
            CLOCK => u64::from(self.clock & 1),
            RESET => u64::from(self.reset & 1),
            IO_OUT => u64::from(self.io_out),
            COUNT => u64::from(self.count),
            other => panic!("Counter has no signal {}", other.as_raw()),
        }
    }

    fn write_input(&mut self, id: SignalId, value: u64) {
        match id {
            CLOCK => self.clock = value as u8,
            RESET => self.reset = value as u8,
            other => panic!("Counter signal {} is not an input", other.as_raw()),
        }
    }

    fn eval(&mut self, ctx: &SimContext) -> Result<(), SimError> {
        Counter::eval(self, ctx)
    }

    fn finalize(&mut self) -> Result<(), SimError> {
        Counter::finalize(self)
    }

    fn is_finalized(&self) -> bool {
        self.finalized
    }
}
