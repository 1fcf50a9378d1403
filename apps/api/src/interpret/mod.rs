//! Response interpretation: converts free-form model output into validated domain results.
//!
//! Flow: raw text → envelope → `serde_json::Value` → per-field decode → assembled result.
//!
//! The pipeline is pure and synchronous. It holds no state between calls, so
//! the same input always yields the same result or the same classified error.
//! Call it only with text from a completed upstream call.

pub mod assembler;
pub mod classify;
pub mod decoder;
pub mod envelope;

use serde::Serialize;
use tracing::debug;

pub use assembler::{BulletPointResult, ComparativeAnalysis, FreeTextResult};
pub use classify::ClassifiedError;

use assembler::{
    assemble_bullet_points, assemble_comparative_analysis, assemble_free_text, parse_envelope,
};
use envelope::extract_envelope;

/// Selects which domain result the pipeline assembles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    BulletList,
    FreeText,
    ComparativeAnalysis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DomainResult {
    BulletPoints(BulletPointResult),
    FreeText(FreeTextResult),
    ComparativeAnalysis(ComparativeAnalysis),
}

/// Runs the pipeline for `shape` over `raw`.
pub fn interpret(raw: &str, shape: ResponseShape) -> Result<DomainResult, ClassifiedError> {
    debug!(?shape, "Raw AI response: {raw}");

    match shape {
        ResponseShape::BulletList => interpret_bullet_points(raw).map(DomainResult::BulletPoints),
        ResponseShape::FreeText => interpret_free_text(raw).map(DomainResult::FreeText),
        ResponseShape::ComparativeAnalysis => {
            interpret_comparative_analysis(raw).map(DomainResult::ComparativeAnalysis)
        }
    }
}

pub fn interpret_bullet_points(raw: &str) -> Result<BulletPointResult, ClassifiedError> {
    let envelope = extract_envelope(raw)?;
    let root = parse_envelope(envelope, raw)?;
    assemble_bullet_points(&root, raw)
}

/// The message content is the text; no envelope is extracted.
pub fn interpret_free_text(raw: &str) -> Result<FreeTextResult, ClassifiedError> {
    assemble_free_text(raw)
}

pub fn interpret_comparative_analysis(raw: &str) -> Result<ComparativeAnalysis, ClassifiedError> {
    let envelope = extract_envelope(raw)?;
    let root = parse_envelope(envelope, raw)?;
    Ok(assemble_comparative_analysis(&root))
}
