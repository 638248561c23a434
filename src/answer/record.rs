// src/answer/record.rs

//! The submitted-answer record.

use serde::{Deserialize, Serialize};

/// Result of one run cycle, handed to the host's grading flow.
///
/// Exactly one record is produced per execution attempt (or per fallback
/// timeout if the attempt stalls), and it is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// The learner's source text at the moment the cycle terminated.
    pub code: String,
    /// Captured textual output, possibly empty.
    pub output: String,
    /// Reserved for the host's grading pipeline; always empty here.
    #[serde(default)]
    pub evaluation: String,
    /// Error message reported by the widget runtime, empty if none.
    pub error: String,
}

impl AnswerRecord {
    /// Record for a run that finished and produced (possibly empty) output.
    ///
    /// A falsy capture (`None`) is recorded as an empty output string.
    pub fn finished(code: impl Into<String>, output: Option<String>) -> Self {
        Self {
            code: code.into(),
            output: output.unwrap_or_default(),
            evaluation: String::new(),
            error: String::new(),
        }
    }

    /// Record for a run that failed with an error message.
    pub fn failed(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            output: String::new(),
            evaluation: String::new(),
            error: message.into(),
        }
    }

    /// Fallback record for a run that produced no terminal event in time.
    pub fn timed_out(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            output: String::new(),
            evaluation: String::new(),
            error: String::new(),
        }
    }
}
