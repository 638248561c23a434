// src/session/event_handlers.rs

//! Event handling logic for the session core.

use crate::session::{CyclePhase, RunId, RunOutcome};

use super::core::CycleState;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Run the widget reveal sequence (setup script, chrome, focus).
    RevealEditor,
    /// Arm the fallback timer for run cycle `run`.
    ArmFallback { run: RunId },
    /// Arm the error-suppression clear timer.
    ArmSuppressionClear,
    /// Submit the current cycle's record with this outcome.
    Submit(RunOutcome),
    /// Restore the editor buffer to the initial code.
    ResetEditor,
}

/// Decision returned by the core after handling a single `SessionEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStep {
    /// Commands the IO shell should execute.
    pub commands: Vec<SessionCommand>,
    /// Whether the outer session loop should keep running.
    pub keep_running: bool,
}

/// Handle the start of a run.
///
/// Every start opens a fresh cycle, even when the previous one never
/// produced a record: the counter moves on and the old cycle's fallback
/// timer becomes stale. The suppression flag is left alone; an error window
/// opened moments ago still covers the new cycle's completion.
pub fn handle_run_started(state: &mut CycleState) -> SessionStep {
    state.run_counter += 1;
    state.phase = CyclePhase::Running;

    SessionStep {
        commands: vec![SessionCommand::ArmFallback {
            run: state.run_counter,
        }],
        keep_running: true,
    }
}

/// Handle a run completion.
///
/// Ignored when no run is in flight, when the cycle already submitted, or
/// while the error-suppression window is open.
pub fn handle_run_finished(
    state: &mut CycleState,
    output: Option<String>,
) -> SessionStep {
    if state.phase != CyclePhase::Running || state.suppressing {
        return SessionStep {
            commands: Vec::new(),
            keep_running: true,
        };
    }

    state.phase = CyclePhase::Submitted;

    SessionStep {
        commands: vec![SessionCommand::Submit(RunOutcome::Finished { output })],
        keep_running: true,
    }
}

/// Handle a run error.
///
/// Ignored when no run is in flight or the cycle already submitted; an
/// ignored error leaves the suppression window untouched. Otherwise the
/// error record is submitted and the suppression window opens.
pub fn handle_run_failed(state: &mut CycleState, message: String) -> SessionStep {
    if state.phase != CyclePhase::Running {
        return SessionStep {
            commands: Vec::new(),
            keep_running: true,
        };
    }

    state.phase = CyclePhase::Submitted;
    state.suppressing = true;

    SessionStep {
        commands: vec![
            SessionCommand::Submit(RunOutcome::Failed { message }),
            SessionCommand::ArmSuppressionClear,
        ],
        keep_running: true,
    }
}

/// Handle a fallback timer expiry.
///
/// Only the expiry armed for the current cycle counts; anything older is a
/// leftover from a cycle that already moved on.
pub fn handle_fallback_elapsed(state: &mut CycleState, run: RunId) -> SessionStep {
    if run != state.run_counter || state.phase != CyclePhase::Running {
        return SessionStep {
            commands: Vec::new(),
            keep_running: true,
        };
    }

    state.phase = CyclePhase::Submitted;

    SessionStep {
        commands: vec![SessionCommand::Submit(RunOutcome::TimedOut)],
        keep_running: true,
    }
}

/// Handle the end of the error-suppression window.
///
/// Clearing is idempotent; overlapping windows are collapsed by whichever
/// expiry arrives first.
pub fn handle_suppression_elapsed(state: &mut CycleState) -> SessionStep {
    state.suppressing = false;

    SessionStep {
        commands: Vec::new(),
        keep_running: true,
    }
}
