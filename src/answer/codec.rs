// src/answer/codec.rs

//! Escaped-JSON transport codec.
//!
//! Answers and construction parameters cross the host boundary as JSON that
//! has additionally been HTML-entity escaped. Decoding unescapes the five
//! entities and parses the JSON; encoding is the inverse.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::Result;

/// Unescape the five HTML entities used on the host boundary.
///
/// `&amp;` is replaced last so doubly-escaped input survives a round trip.
pub fn unescape_html(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Escape a string for the host boundary.
///
/// `&` is replaced first so entities introduced here stay distinct from
/// any already present in the input.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Decode an escaped-JSON payload into a typed value.
pub fn decode<T: DeserializeOwned>(escaped: &str) -> Result<T> {
    let json = unescape_html(escaped);
    Ok(serde_json::from_str(&json)?)
}

/// Encode a value as an escaped-JSON payload.
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(escape_html(&json))
}
