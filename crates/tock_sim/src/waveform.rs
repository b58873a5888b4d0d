//! Waveform recording in Value Change Dump format.
//!
//! [`WaveformRecorder`] is the format-independent interface; [`VcdRecorder`]
//! writes IEEE 1364 VCD text that GTKWave, Surfer and similar viewers read.
//! Models are two-state, so values are plain integers.

use std::io::Write;

use crate::error::SimError;
use crate::signal::{width_mask, SignalId};

/// Sink for signal declarations and value changes.
pub trait WaveformRecorder {
    /// Opens a scope (module instance) in the declaration section.
    fn begin_scope(&mut self, name: &str) -> Result<(), SimError>;

    /// Closes the innermost open scope.
    fn end_scope(&mut self) -> Result<(), SimError>;

    /// Declares a signal in the current scope.
    fn register_signal(&mut self, id: SignalId, name: &str, width: u32) -> Result<(), SimError>;

    /// Records `value` for signal `id` at `time`.
    fn record_change(&mut self, time: u64, id: SignalId, value: u64) -> Result<(), SimError>;

    /// Flushes buffered output.
    fn finalize(&mut self) -> Result<(), SimError>;
}

struct VcdVar {
    id: SignalId,
    code: String,
    width: u32,
}

/// VCD writer over any [`Write`] implementation.
pub struct VcdRecorder<W: Write> {
    writer: W,
    timescale: String,
    vars: Vec<VcdVar>,
    header_written: bool,
    definitions_closed: bool,
    current_time: Option<u64>,
}

impl<W: Write> VcdRecorder<W> {
    /// Creates a recorder with a `1ns` timescale.
    pub fn new(writer: W) -> Self {
        Self::with_timescale(writer, "1ns")
    }

    /// Creates a recorder with the given `$timescale` text, e.g. `"10ps"`.
    pub fn with_timescale(writer: W, timescale: &str) -> Self {
        Self {
            writer,
            timescale: timescale.to_string(),
            vars: Vec::new(),
            header_written: false,
            definitions_closed: false,
            current_time: None,
        }
    }

    /// Consumes the recorder and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ensure_header(&mut self) -> Result<(), SimError> {
        if self.header_written {
            return Ok(());
        }
        writeln!(self.writer, "$version")?;
        writeln!(self.writer, "  Tock {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.writer, "$end")?;
        writeln!(self.writer, "$timescale {} $end", self.timescale)?;
        self.header_written = true;
        Ok(())
    }

    fn close_definitions(&mut self) -> Result<(), SimError> {
        self.ensure_header()?;
        if !self.definitions_closed {
            writeln!(self.writer, "$enddefinitions $end")?;
            self.definitions_closed = true;
        }
        Ok(())
    }

    /// Short identifier code for the `index`-th variable.
    ///
    /// Codes are base-94 strings over the printable range `!`..=`~`.
    fn id_code(index: usize) -> String {
        let mut code = Vec::new();
        let mut n = index;
        loop {
            code.push(b'!' + (n % 94) as u8);
            n /= 94;
            if n == 0 {
                break;
            }
            n -= 1;
        }
        code.reverse();
        String::from_utf8(code).unwrap_or_default()
    }

    fn format_value(value: u64, width: u32) -> String {
        let value = value & width_mask(width);
        if width == 1 {
            format!("{value}")
        } else {
            format!("b{value:b} ")
        }
    }
}

impl<W: Write> WaveformRecorder for VcdRecorder<W> {
    fn begin_scope(&mut self, name: &str) -> Result<(), SimError> {
        self.ensure_header()?;
        writeln!(self.writer, "$scope module {name} $end")?;
        Ok(())
    }

    fn end_scope(&mut self) -> Result<(), SimError> {
        writeln!(self.writer, "$upscope $end")?;
        Ok(())
    }

    fn register_signal(&mut self, id: SignalId, name: &str, width: u32) -> Result<(), SimError> {
        self.ensure_header()?;
        let code = Self::id_code(self.vars.len());
        if width == 1 {
            writeln!(self.writer, "$var wire 1 {code} {name} $end")?;
        } else {
            writeln!(
                self.writer,
                "$var wire {width} {code} {name} [{}:0] $end",
                width - 1
            )?;
        }
        self.vars.push(VcdVar { id, code, width });
        Ok(())
    }

    fn record_change(&mut self, time: u64, id: SignalId, value: u64) -> Result<(), SimError> {
        self.close_definitions()?;
        match self.current_time {
            Some(previous) if time < previous => {
                return Err(SimError::NonMonotonicTime { previous, time });
            }
            Some(previous) if time == previous => {}
            _ => {
                writeln!(self.writer, "#{time}")?;
                self.current_time = Some(time);
            }
        }
        let var = self
            .vars
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| SimError::InvalidSignalRef {
                reason: format!("unregistered VCD signal {}", id.as_raw()),
            })?;
        let text = Self::format_value(value, var.width);
        writeln!(self.writer, "{text}{}", var.code)?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), SimError> {
        self.close_definitions()?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(rec: VcdRecorder<Vec<u8>>) -> String {
        String::from_utf8(rec.into_inner()).unwrap()
    }

    fn counter_recorder() -> VcdRecorder<Vec<u8>> {
        let mut rec = VcdRecorder::new(Vec::new());
        rec.begin_scope("TOP").unwrap();
        rec.register_signal(SignalId::from_raw(0), "clock", 1).unwrap();
        rec.register_signal(SignalId::from_raw(2), "io_out", 3).unwrap();
        rec.end_scope().unwrap();
        rec
    }

    #[test]
    fn id_codes() {
        type R = VcdRecorder<Vec<u8>>;
        assert_eq!(R::id_code(0), "!");
        assert_eq!(R::id_code(1), "\"");
        assert_eq!(R::id_code(93), "~");
        assert_eq!(R::id_code(94), "!!");
        assert_eq!(R::id_code(95), "!\"");
    }

    #[test]
    fn declarations() {
        let out = output(counter_recorder());
        assert!(out.starts_with("$version"));
        assert!(out.contains("$timescale 1ns $end"));
        assert!(out.contains("$scope module TOP $end"));
        assert!(out.contains("$var wire 1 ! clock $end"));
        assert!(out.contains("$var wire 3 \" io_out [2:0] $end"));
        assert!(out.contains("$upscope $end"));
    }

    #[test]
    fn value_changes() {
        let mut rec = counter_recorder();
        rec.record_change(1, SignalId::from_raw(0), 0).unwrap();
        rec.record_change(1, SignalId::from_raw(2), 5).unwrap();
        rec.record_change(2, SignalId::from_raw(0), 1).unwrap();
        rec.finalize().unwrap();
        let out = output(rec);
        let defs = out.find("$enddefinitions $end").unwrap();
        let body = &out[defs..];
        assert_eq!(
            body.lines().skip(1).collect::<Vec<_>>(),
            vec!["#1", "0!", "b101 \"", "#2", "1!"]
        );
        assert_eq!(out.matches("$enddefinitions").count(), 1);
    }

    #[test]
    fn values_are_masked_to_width() {
        let mut rec = counter_recorder();
        rec.record_change(0, SignalId::from_raw(2), 0b1111).unwrap();
        let out = output(rec);
        assert!(out.contains("b111 \""));
    }

    #[test]
    fn time_must_not_go_backwards() {
        let mut rec = counter_recorder();
        rec.record_change(5, SignalId::from_raw(0), 1).unwrap();
        let err = rec.record_change(4, SignalId::from_raw(0), 0).unwrap_err();
        assert!(matches!(
            err,
            SimError::NonMonotonicTime {
                previous: 5,
                time: 4
            }
        ));
    }

    #[test]
    fn unregistered_signal_is_rejected() {
        let mut rec = counter_recorder();
        let err = rec.record_change(0, SignalId::from_raw(9), 1).unwrap_err();
        assert!(matches!(err, SimError::InvalidSignalRef { .. }));
    }

    #[test]
    fn finalize_without_changes_closes_definitions() {
        let mut rec = VcdRecorder::with_timescale(Vec::new(), "10ps");
        rec.finalize().unwrap();
        let out = output(rec);
        assert!(out.contains("$timescale 10ps $end"));
        assert!(out.contains("$enddefinitions $end"));
    }
}
