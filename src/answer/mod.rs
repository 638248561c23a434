// src/answer/mod.rs

//! Answer model for one run attempt.
//!
//! - [`record`] defines the immutable answer record handed to the host.
//! - [`codec`] implements the escaped-JSON transport the host uses for
//!   widget parameters and stored answers.
//! - [`rules`] contains the grading rules the host evaluates over submitted
//!   records, plus the code/output normalization they rely on.

pub mod codec;
pub mod record;
pub mod rules;

pub use record::AnswerRecord;
pub use rules::{normalize_code, AnswerRule};
