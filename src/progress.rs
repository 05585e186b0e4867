//! Progress reporting.
//!
//! Engines push one [`Frame`] per temperature step (SA) or generation (GA)
//! and exactly one finished notification at the end of a successful run.
//! Observers run synchronously on the engine's thread and must not block.

use std::sync::mpsc::Sender;

/// Snapshot of search progress after one temperature step or generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// One-based index of the completed step or generation.
    pub step: usize,
    /// Total number of steps or generations in the run.
    pub total_steps: usize,
    /// Population costs in slot order (GA) or the current trajectory cost (SA).
    pub costs: Vec<f64>,
    /// Best cost found so far.
    pub best_cost: f64,
    /// Visiting order of the best tour found so far.
    pub best_order: Vec<usize>,
    /// Temperature the step ran at (SA only).
    pub temperature: Option<f64>,
}

impl Frame {
    /// Fraction of the run completed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.total_steps == 0 {
            1.0
        } else {
            self.step as f64 / self.total_steps as f64
        }
    }
}

/// A progress event as delivered through channels and recorders.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressEvent {
    Frame(Frame),
    Finished { best_cost: f64 },
}

/// Receives progress from an engine.
pub trait ProgressObserver {
    /// Called after every temperature step or generation.
    fn on_frame(&mut self, frame: &Frame);

    /// Called once when the run completes.
    fn on_finished(&mut self, best_cost: f64);
}

/// Discards all progress.
impl ProgressObserver for () {
    fn on_frame(&mut self, _frame: &Frame) {}

    fn on_finished(&mut self, _best_cost: f64) {}
}

/// Records every event in order.
impl ProgressObserver for Vec<ProgressEvent> {
    fn on_frame(&mut self, frame: &Frame) {
        self.push(ProgressEvent::Frame(frame.clone()));
    }

    fn on_finished(&mut self, best_cost: f64) {
        self.push(ProgressEvent::Finished { best_cost });
    }
}

/// Forwards events over an unbounded channel.
///
/// Sending never blocks. Events sent after the receiver is dropped are
/// discarded.
impl ProgressObserver for Sender<ProgressEvent> {
    fn on_frame(&mut self, frame: &Frame) {
        if self.send(ProgressEvent::Frame(frame.clone())).is_err() {
            log::trace!("progress receiver dropped; frame {} discarded", frame.step);
        }
    }

    fn on_finished(&mut self, best_cost: f64) {
        if self.send(ProgressEvent::Finished { best_cost }).is_err() {
            log::trace!("progress receiver dropped; finish event discarded");
        }
    }
}

impl<O: ProgressObserver + ?Sized> ProgressObserver for &mut O {
    fn on_frame(&mut self, frame: &Frame) {
        (**self).on_frame(frame);
    }

    fn on_finished(&mut self, best_cost: f64) {
        (**self).on_finished(best_cost);
    }
}

/// Writes progress through the `log` facade.
///
/// Frames are logged at `debug` level every `interval` steps (and on the
/// last step); the finish event at `info`.
#[derive(Debug, Clone)]
pub struct LogObserver {
    name: String,
    interval: usize,
}

impl LogObserver {
    /// Creates a logger labelled `name` reporting every `interval` steps.
    pub fn new(name: impl Into<String>, interval: usize) -> Self {
        Self {
            name: name.into(),
            interval: interval.max(1),
        }
    }
}

impl ProgressObserver for LogObserver {
    fn on_frame(&mut self, frame: &Frame) {
        if frame.step % self.interval != 0 && frame.step != frame.total_steps {
            return;
        }
        match frame.temperature {
            Some(t) => log::debug!(
                "{} step {}/{}: temp={:.4}, best={:.4}",
                self.name,
                frame.step,
                frame.total_steps,
                t,
                frame.best_cost
            ),
            None => log::debug!(
                "{} step {}/{}: best={:.4}",
                self.name,
                frame.step,
                frame.total_steps,
                frame.best_cost
            ),
        }
    }

    fn on_finished(&mut self, best_cost: f64) {
        log::info!("{} finished: best={:.4}", self.name, best_cost);
    }
}
