// src/response.rs

//! Read-only renderers for previously submitted answers.
//!
//! The host stores answers as escaped JSON. Both views decode the stored
//! object and expose only its `code` field; they never modify the answer.

use serde::Deserialize;

use crate::answer::codec;
use crate::errors::Result;

/// Stored answer as the views need it; unrelated fields are ignored.
#[derive(Debug, Deserialize)]
struct StoredAnswer {
    code: String,
}

/// Full response renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseView {
    code: String,
}

impl ResponseView {
    /// Decode an escaped-JSON stored answer.
    pub fn from_escaped(answer: &str) -> Result<Self> {
        let stored: StoredAnswer = codec::decode(answer)?;
        Ok(Self { code: stored.code })
    }

    /// The submitted code, as stored.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Summary renderer used in compact answer listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortResponseView {
    code: String,
}

impl ShortResponseView {
    /// Decode an escaped-JSON stored answer.
    pub fn from_escaped(answer: &str) -> Result<Self> {
        let stored: StoredAnswer = codec::decode(answer)?;
        Ok(Self { code: stored.code })
    }

    /// The submitted code, as stored.
    pub fn code(&self) -> &str {
        &self.code
    }
}
