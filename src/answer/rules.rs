// src/answer/rules.rs

//! Grading rules evaluated over submitted answer records.
//!
//! Code rules compare line-normalized text so indentation still matters but
//! trailing whitespace and blank lines do not. Output and error rules compare
//! whitespace-collapsed text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::answer::record::AnswerRecord;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#.*").expect("valid comment pattern"));

/// Normalize a code string for comparison.
///
/// Drops blank lines and trailing whitespace on each line. Leading
/// indentation is preserved.
pub fn normalize_code(code: &str) -> String {
    code.trim_end()
        .split('\n')
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reduce code to a similarity key: drop `#` comments, then all whitespace.
fn similarity_key(code: &str) -> String {
    COMMENT_RE
        .replace_all(code, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// One grading check against a submitted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum AnswerRule {
    CodeEquals { value: String },
    CodeContains { value: String },
    CodeDoesNotContain { value: String },
    OutputEquals { value: String },
    OutputContains { value: String },
    OutputDoesNotContain { value: String },
    ResultsInError,
    ErrorContains { value: String },
    SimilarTo { training: Vec<AnswerRecord> },
}

impl AnswerRule {
    /// Evaluate the rule against a record.
    pub fn matches(&self, record: &AnswerRecord) -> bool {
        match self {
            Self::CodeEquals { value } => normalize_code(&record.code) == normalize_code(value),
            Self::CodeContains { value } => {
                normalize_code(&record.code).contains(&normalize_code(value))
            }
            Self::CodeDoesNotContain { value } => {
                !collapse_whitespace(&record.code).contains(&collapse_whitespace(value))
            }
            Self::OutputEquals { value } => {
                collapse_whitespace(&record.output) == collapse_whitespace(value)
            }
            Self::OutputContains { value } => {
                collapse_whitespace(&record.output).contains(&collapse_whitespace(value))
            }
            Self::OutputDoesNotContain { value } => {
                !collapse_whitespace(&record.output).contains(&collapse_whitespace(value))
            }
            Self::ResultsInError => !record.error.trim().is_empty(),
            Self::ErrorContains { value } => {
                collapse_whitespace(&record.error).contains(&collapse_whitespace(value))
            }
            Self::SimilarTo { training } => {
                let key = similarity_key(&record.code);
                training.iter().any(|known| similarity_key(&known.code) == key)
            }
        }
    }

    /// Human-readable phrasing used in harness check reports.
    pub fn description(&self) -> String {
        match self {
            Self::CodeEquals { value } => format!("has code equal to {value:?}"),
            Self::CodeContains { value } => format!("has code that contains {value:?}"),
            Self::CodeDoesNotContain { value } => {
                format!("has code that does not contain {value:?}")
            }
            Self::OutputEquals { value } => format!("has output equal to {value:?}"),
            Self::OutputContains { value } => format!("has output that contains {value:?}"),
            Self::OutputDoesNotContain { value } => {
                format!("has output that does not contain {value:?}")
            }
            Self::ResultsInError => "results in an error when run".to_string(),
            Self::ErrorContains { value } => {
                format!("has error message that contains {value:?}")
            }
            Self::SimilarTo { training } => {
                format!("is similar to one of {} known submissions", training.len())
            }
        }
    }
}
