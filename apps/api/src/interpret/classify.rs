//! Error Classifier: the closed set of terminal pipeline failures.
//!
//! Every failure carries a bounded preview of the original model output so
//! callers can log or surface it without leaking the full payload.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Maximum number of characters of raw model output kept on a failure.
pub const RAW_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
pub enum ErrorKind {
    #[error("AI service returned an empty response")]
    EmptyUpstreamResponse,

    /// Advisory only. Recorded when no `{ ... }` pair exists; parsing still proceeds.
    #[error("no JSON object boundaries found in AI response")]
    NoJsonObjectFound,

    #[error("AI response was not valid JSON")]
    MalformedJson,

    #[error("AI response JSON was missing a required field")]
    MissingRequiredField,
}

impl ErrorKind {
    /// Stable machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::EmptyUpstreamResponse => "EMPTY_AI_RESPONSE",
            ErrorKind::NoJsonObjectFound => "NO_JSON_OBJECT",
            ErrorKind::MalformedJson => "MALFORMED_AI_RESPONSE",
            ErrorKind::MissingRequiredField => "MISSING_AI_FIELD",
        }
    }
}

/// A terminal pipeline failure with a bounded diagnostic snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{kind}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub raw_preview: String,
}

impl ClassifiedError {
    pub fn new(kind: ErrorKind, raw: &str) -> Self {
        let raw_preview = preview(raw);
        warn!(kind = ?kind, raw_preview = %raw_preview, "AI response could not be interpreted");
        Self { kind, raw_preview }
    }
}

/// First `RAW_PREVIEW_CHARS` characters of `raw`, never split inside a UTF-8 sequence.
pub fn preview(raw: &str) -> String {
    raw.chars().take(RAW_PREVIEW_CHARS).collect()
}
