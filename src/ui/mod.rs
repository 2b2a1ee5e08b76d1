//! Progress reporting
//!
//! Generation code talks to a `Ui` so the binary can print progress while
//! tests and library callers stay quiet.

use std::fmt;

/// Application phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parsing,
    Generating,
    Writing,
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Parsing => write!(f, "Parsing header"),
            Phase::Generating => write!(f, "Generating artifacts"),
            Phase::Writing => write!(f, "Writing files"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Trait for UI implementations - console output or silent/test mode
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn log(&mut self, message: impl Into<String>);
}

/// Line-based console output
#[derive(Default)]
pub struct ConsoleUi {
    phase: Option<Phase>,
    verbose: bool,
}

impl ConsoleUi {
    pub fn new(verbose: bool) -> Self {
        Self {
            phase: None,
            verbose,
        }
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        if self.phase != Some(phase) {
            println!("{}...", phase);
            self.phase = Some(phase);
        }
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        if self.verbose {
            println!("  [{}/{}] {}", current, total, label.into());
        }
    }

    fn log(&mut self, message: impl Into<String>) {
        println!("{}", message.into());
    }
}

/// Silent UI implementation for testing and non-interactive use
#[derive(Default)]
pub struct SilentUi;

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn log(&mut self, _message: impl Into<String>) {}
}
