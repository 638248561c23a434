// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::answer::rules::AnswerRule;
use crate::session::SessionOptions;

/// Top-level scenario as read from a TOML file.
///
/// ```toml
/// [session]
/// initial_code = "print 1"
///
/// [[step]]
/// at_ms = 0
/// event = "start"
///
/// [[step]]
/// at_ms = 500
/// event = "finish"
/// output = "1"
///
/// [[check]]
/// rule = "output_equals"
/// value = "1"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScenarioFile {
    /// Session options from `[session]`.
    #[serde(default)]
    pub session: SessionSection,

    /// Timed widget events from `[[step]]`, in file order.
    #[serde(default)]
    pub step: Vec<StepConfig>,

    /// Grading checks from `[[check]]`, applied to the last record.
    #[serde(default)]
    pub check: Vec<AnswerRule>,
}

/// `[session]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSection {
    /// Editor contents on load and after a reset.
    #[serde(default)]
    pub initial_code: String,

    /// Fallback timeout in milliseconds.
    #[serde(default = "default_fallback_ms")]
    pub fallback_ms: u64,

    /// Error-suppression window in milliseconds.
    #[serde(default = "default_suppression_ms")]
    pub suppression_ms: u64,

    /// Extra wait after the last step before the replay shuts down, in
    /// milliseconds.
    ///
    /// If `None`, the replay waits out the fallback timeout plus a little
    /// slack so a pending fallback record still gets submitted.
    #[serde(default)]
    pub settle_ms: Option<u64>,
}

fn default_fallback_ms() -> u64 {
    3000
}

fn default_suppression_ms() -> u64 {
    1000
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            initial_code: String::new(),
            fallback_ms: default_fallback_ms(),
            suppression_ms: default_suppression_ms(),
            settle_ms: None,
        }
    }
}

/// One `[[step]]` entry: a widget event at a point in replay time.
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    /// When the event fires, in milliseconds from replay start.
    pub at_ms: u64,

    /// The event itself.
    #[serde(flatten)]
    pub action: StepAction,
}

/// The event a step injects.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepAction {
    /// The learner starts a run.
    Start,
    /// The run completes; `output` is staged as the transcript capture.
    Finish {
        #[serde(default)]
        output: Option<String>,
    },
    /// The run fails with an error message.
    Fail { message: String },
    /// The learner edits the buffer to exactly this text.
    Edit { code: String },
    /// The host restores the initial code.
    Reset,
}

/// Validated scenario, produced via `TryFrom<RawScenarioFile>`.
#[derive(Debug, Clone)]
pub struct ScenarioFile {
    pub session: SessionSection,
    pub step: Vec<StepConfig>,
    pub check: Vec<AnswerRule>,
}

impl ScenarioFile {
    /// Construct without re-running validation. Callers must have validated
    /// the raw form first.
    pub(crate) fn new_unchecked(
        session: SessionSection,
        step: Vec<StepConfig>,
        check: Vec<AnswerRule>,
    ) -> Self {
        Self {
            session,
            step,
            check,
        }
    }

    /// Session options for the replay.
    pub fn session_options(&self) -> SessionOptions {
        let mut options = SessionOptions::new(self.session.initial_code.clone());
        options.fallback_timeout = Duration::from_millis(self.session.fallback_ms);
        options.suppression_window = Duration::from_millis(self.session.suppression_ms);
        options
    }

    /// How long the replay waits after the last step before shutting down.
    pub fn settle_time(&self) -> Duration {
        match self.session.settle_ms {
            Some(ms) => Duration::from_millis(ms),
            None => Duration::from_millis(self.session.fallback_ms + 250),
        }
    }
}
