use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Audible cue for a keystroke: `Soft` for a hit or an undo, `Hard` for a miss
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Soft,
    Hard,
}

/// Which feedback signals reach the terminal bell
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BellMode {
    Off,
    #[default]
    Errors,
    All,
}

impl BellMode {
    pub fn rings_for(&self, signal: Feedback) -> bool {
        match self {
            BellMode::Off => false,
            BellMode::Errors => signal == Feedback::Hard,
            BellMode::All => true,
        }
    }
}

pub trait FeedbackSink {
    fn emit(&mut self, signal: Feedback);
}

/// Drops every signal
#[derive(Debug, Default)]
pub struct Silent;

impl FeedbackSink for Silent {
    fn emit(&mut self, _signal: Feedback) {}
}

/// Rings the terminal bell (BEL) for the signals selected by `mode`.
///
/// A bell has no duration, so every trigger plays from the start.
pub struct TerminalBell<W: Write> {
    out: W,
    mode: BellMode,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, mode: BellMode) -> Self {
        Self { out, mode }
    }
}

impl<W: Write> FeedbackSink for TerminalBell<W> {
    fn emit(&mut self, signal: Feedback) {
        if !self.mode.rings_for(signal) {
            return;
        }
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            log::warn!("failed to ring bell for {signal:?}: {err}");
        }
    }
}

/// Keeps every signal it receives, in order
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub signals: Vec<Feedback>,
}

impl FeedbackSink for Recorder {
    fn emit(&mut self, signal: Feedback) {
        self.signals.push(signal);
    }
}

impl<S: FeedbackSink + ?Sized> FeedbackSink for Box<S> {
    fn emit(&mut self, signal: Feedback) {
        (**self).emit(signal)
    }
}
