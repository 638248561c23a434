// src/session/core.rs

//! Pure core session state machine.
//!
//! This module contains a synchronous, deterministic "core" that consumes
//! [`SessionEvent`]s and produces:
//! - an updated cycle state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`session::driver::Session`) is responsible for:
//! - reading events from the channel
//! - arming timers
//! - driving the widget and submitting records
//! - handling Ctrl+C / shutdown
//!
//! The core is intended to be extensively unit tested without any Tokio,
//! channels, widget or timers.

use crate::session::event_handlers::{
    handle_fallback_elapsed, handle_run_failed, handle_run_finished,
    handle_run_started, handle_suppression_elapsed,
};
use crate::session::{CyclePhase, RunId, SessionCommand, SessionEvent, SessionStep};

/// Mutable cycle state of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleState {
    /// Phase of the current run cycle.
    pub phase: CyclePhase,
    /// Id of the newest cycle; fallback expiries for older ids are stale.
    pub run_counter: RunId,
    /// Whether the error-suppression window is open.
    pub suppressing: bool,
}

impl Default for CycleState {
    fn default() -> Self {
        Self {
            phase: CyclePhase::Idle,
            run_counter: 0,
            suppressing: false,
        }
    }
}

/// Pure core session state machine.
///
/// This owns the cycle state. It has **no** channels, no Tokio types, and
/// does not perform any IO.
#[derive(Debug, Default)]
pub struct SessionCore {
    state: CycleState,
}

impl SessionCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose the current cycle phase (for tests).
    pub fn phase(&self) -> CyclePhase {
        self.state.phase
    }

    /// Expose the current run id (for tests).
    pub fn current_run(&self) -> RunId {
        self.state.run_counter
    }

    /// Expose whether error suppression is active (for tests).
    pub fn is_suppressing(&self) -> bool {
        self.state.suppressing
    }

    /// Handle a single session event, updating cycle state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: SessionEvent) -> SessionStep {
        match event {
            SessionEvent::Loaded => SessionStep {
                commands: vec![SessionCommand::RevealEditor],
                keep_running: true,
            },
            SessionEvent::RunStarted => handle_run_started(&mut self.state),
            SessionEvent::RunFinished { output } => {
                handle_run_finished(&mut self.state, output)
            }
            SessionEvent::RunFailed { message } => {
                handle_run_failed(&mut self.state, message)
            }
            SessionEvent::FallbackElapsed { run } => {
                handle_fallback_elapsed(&mut self.state, run)
            }
            SessionEvent::SuppressionElapsed => {
                handle_suppression_elapsed(&mut self.state)
            }
            SessionEvent::ResetRequested => SessionStep {
                commands: vec![SessionCommand::ResetEditor],
                keep_running: true,
            },
            SessionEvent::Shutdown => SessionStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }
}
