//! File-backed waveform tracing of a model.
//!
//! A [`TraceSink`] is attached to a model (capturing its signal table down to
//! a hierarchy depth), opened on a path, sampled once per evaluation step and
//! closed at the end of the run. Dropping an open sink closes it, so the file
//! is flushed on every exit path of the owning scope.
//!
//! ```ignore
//! let mut ctx = SimContext::new();
//! ctx.set_trace_ever_on(true);
//! let mut dut = Counter::new(&mut ctx);
//! let mut tfp = TraceSink::new();
//! tfp.attach(&ctx, &dut, 99)?;
//! tfp.open("wave.vcd")?;
//! ctx.time_inc(1);
//! dut.eval(&ctx)?;
//! tfp.dump(ctx.time(), &dut)?;
//! tfp.close()?;
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::context::SimContext;
use crate::error::SimError;
use crate::model::Model;
use crate::signal::SignalInfo;
use crate::waveform::{VcdRecorder, WaveformRecorder};

/// Records model signals into a VCD file.
pub struct TraceSink {
    timescale: String,
    signals: Vec<SignalInfo>,
    last_values: Vec<Option<u64>>,
    recorder: Option<VcdRecorder<BufWriter<File>>>,
    path: Option<PathBuf>,
}

impl TraceSink {
    /// Creates a detached, closed sink with a `1ns` timescale.
    pub fn new() -> Self {
        Self::with_timescale("1ns")
    }

    /// Creates a detached, closed sink with the given timescale.
    pub fn with_timescale(timescale: &str) -> Self {
        Self {
            timescale: timescale.to_string(),
            signals: Vec::new(),
            last_values: Vec::new(),
            recorder: None,
            path: None,
        }
    }

    /// Captures the signals of `model` whose scope depth is at most `depth`.
    ///
    /// Attaching again replaces the previous selection. Fails while the sink
    /// is open, or when tracing was never enabled on `ctx`.
    pub fn attach(
        &mut self,
        ctx: &SimContext,
        model: &dyn Model,
        depth: u32,
    ) -> Result<(), SimError> {
        if !ctx.trace_ever_on() {
            return Err(SimError::TracingDisabled);
        }
        if self.is_open() {
            return Err(SimError::TraceAlreadyOpen);
        }
        let mut signals: Vec<SignalInfo> = model
            .signals()
            .iter()
            .filter(|s| s.depth() <= depth)
            .cloned()
            .collect();
        // Group by scope while keeping declaration order inside a scope.
        signals.sort_by(|a, b| a.scope_path().cmp(&b.scope_path()));
        self.last_values = vec![None; signals.len()];
        self.signals = signals;
        Ok(())
    }

    /// Creates the trace file and writes the declaration section.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), SimError> {
        if self.is_open() {
            return Err(SimError::TraceAlreadyOpen);
        }
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| SimError::TraceOpen {
            path: path.clone(),
            source,
        })?;
        let mut recorder = VcdRecorder::with_timescale(BufWriter::new(file), &self.timescale);
        write_declarations(&mut recorder, &self.signals)?;
        self.last_values.iter_mut().for_each(|v| *v = None);
        debug!(
            "opened trace {} with {} signal(s)",
            path.display(),
            self.signals.len()
        );
        self.recorder = Some(recorder);
        self.path = Some(path);
        Ok(())
    }

    /// Writes the signals of `model` that changed since the last sample.
    ///
    /// The first sample after [`open`](TraceSink::open) writes every signal.
    pub fn dump(&mut self, time: u64, model: &dyn Model) -> Result<(), SimError> {
        let recorder = self.recorder.as_mut().ok_or(SimError::TraceNotOpen)?;
        for (info, last) in self.signals.iter().zip(self.last_values.iter_mut()) {
            let value = model.read_id(info.id);
            if *last != Some(value) {
                recorder.record_change(time, info.id, value)?;
                *last = Some(value);
            }
        }
        Ok(())
    }

    /// Flushes and closes the trace file. Closing a closed sink is a no-op.
    pub fn close(&mut self) -> Result<(), SimError> {
        if let Some(mut recorder) = self.recorder.take() {
            recorder.finalize()?;
            if let Some(path) = self.path.take() {
                debug!("closed trace {}", path.display());
            }
        }
        Ok(())
    }

    /// Returns whether a trace file is currently open.
    pub fn is_open(&self) -> bool {
        self.recorder.is_some()
    }

    /// Signals selected by the last [`attach`](TraceSink::attach).
    pub fn signals(&self) -> &[SignalInfo] {
        &self.signals
    }
}

impl Default for TraceSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TraceSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("failed to close trace: {e}");
        }
    }
}

/// Emits nested `$scope` blocks for signals sorted by scope path.
fn write_declarations<R: WaveformRecorder>(
    recorder: &mut R,
    signals: &[SignalInfo],
) -> Result<(), SimError> {
    let mut open: Vec<String> = Vec::new();
    for info in signals {
        let path = info.scope_path();
        let common = open
            .iter()
            .zip(path.iter())
            .take_while(|(a, b)| a.as_str() == **b)
            .count();
        while open.len() > common {
            recorder.end_scope()?;
            open.pop();
        }
        for component in &path[common..] {
            recorder.begin_scope(component)?;
            open.push(component.to_string());
        }
        recorder.register_signal(info.id, &info.name, info.width)?;
    }
    for _ in &open {
        recorder.end_scope()?;
    }
    Ok(())
}
