// src/session/mod.rs

//! Session engine for one embedded-widget exercise.
//!
//! This module ties together:
//! - the per-cycle phase machine that enforces one submission per run
//! - the main session event loop that reacts to:
//!   - widget lifecycle events (load, start-execute, execute, error)
//!   - fallback and suppression timer expiries
//!   - reset and shutdown requests
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`driver`].

use std::time::Duration;

use crate::answer::codec;
use crate::errors::Result;

/// Identifier of one run cycle, strictly increasing within a session.
pub type RunId = u64;

/// Phase of the current run cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// No run is in flight (startup, or the last cycle never started).
    Idle,
    /// A run started and has not produced its record yet.
    Running,
    /// The current cycle already produced its record.
    Submitted,
}

/// How a run cycle terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No terminal event arrived within the fallback timeout.
    TimedOut,
    /// The run completed; `output` is the captured transcript, `None` when
    /// the widget reported nothing capturable.
    Finished { output: Option<String> },
    /// The run raised an error.
    Failed { message: String },
}

/// Events flowing into the session from the widget forwarder, timers and the
/// embedding host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The widget finished loading.
    Loaded,
    /// The learner started a run.
    RunStarted,
    /// The run completed with the given captured output.
    RunFinished { output: Option<String> },
    /// The run raised an error.
    RunFailed { message: String },
    /// The fallback timer armed for run cycle `run` expired.
    FallbackElapsed { run: RunId },
    /// The error-suppression window elapsed.
    SuppressionElapsed,
    /// The host asked to restore the initial code.
    ResetRequested,
    /// Graceful shutdown requested (e.g. Ctrl-C in the harness).
    Shutdown,
}

/// Per-session tuning, fixed at construction.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Editor contents on load and after a reset.
    pub initial_code: String,
    /// How long to wait for a terminal event before submitting code-only.
    pub fallback_timeout: Duration,
    /// How long completions stay suppressed after an error.
    pub suppression_window: Duration,
}

impl SessionOptions {
    pub const DEFAULT_FALLBACK_TIMEOUT: Duration = Duration::from_secs(3);
    pub const DEFAULT_SUPPRESSION_WINDOW: Duration = Duration::from_secs(1);

    pub fn new(initial_code: impl Into<String>) -> Self {
        Self {
            initial_code: initial_code.into(),
            fallback_timeout: Self::DEFAULT_FALLBACK_TIMEOUT,
            suppression_window: Self::DEFAULT_SUPPRESSION_WINDOW,
        }
    }

    /// Build options from the host's escaped-JSON initial-code parameter.
    pub fn from_escaped_initial_code(escaped: &str) -> Result<Self> {
        let initial_code: String = codec::decode(escaped)?;
        Ok(Self::new(initial_code))
    }
}

pub mod core;
pub mod driver;
pub mod event_handlers;

pub use core::{CycleState, SessionCore};
pub use driver::Session;
pub use event_handlers::{SessionCommand, SessionStep};
