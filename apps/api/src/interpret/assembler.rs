//! Result Assembler: turns a parsed envelope into one of the three domain results.
//!
//! Required-field policy per shape:
//! - bullet list: `bulletPoints` must be an array, else `MissingRequiredField`
//! - free text: the trimmed message itself is the result
//! - comparative analysis: nothing is required, every field has a default

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::interpret::classify::{ClassifiedError, ErrorKind};
use crate::interpret::decoder::{decode_object_array, decode_string, decode_string_array};
use crate::interpret::envelope::Envelope;

/// Substituted when the model returns an empty `bulletPoints` array.
pub const PLACEHOLDER_BULLET: &str = "Generated bullet point placeholder.";
pub const DEFAULT_PROJECT_NAME: &str = "Unknown Project";
pub const DEFAULT_JUSTIFICATION: &str = "No justification provided.";
pub const DEFAULT_SUMMARY: &str = "Unable to generate summary.";

const BULLET_POINTS_KEY: &str = "bulletPoints";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletPointResult {
    /// Never empty.
    pub bullet_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextResult {
    /// Non-empty and trimmed.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProject {
    pub project_name: String,
    pub relevance_justification: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparativeAnalysis {
    pub identified_job_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub ranked_projects: Vec<RankedProject>,
    pub overall_summary: String,
}

impl Default for ComparativeAnalysis {
    fn default() -> Self {
        Self {
            identified_job_skills: Vec::new(),
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            ranked_projects: Vec::new(),
            overall_summary: DEFAULT_SUMMARY.to_string(),
        }
    }
}

/// Parses the envelope text once. A syntax error is the only failure that
/// happens before field decoding.
pub fn parse_envelope(envelope: Envelope<'_>, raw: &str) -> Result<Value, ClassifiedError> {
    serde_json::from_str(envelope.text).map_err(|e| {
        warn!(boundary = ?envelope.boundary, "Failed to parse extracted JSON: {e}");
        ClassifiedError::new(ErrorKind::MalformedJson, raw)
    })
}

pub fn assemble_bullet_points(root: &Value, raw: &str) -> Result<BulletPointResult, ClassifiedError> {
    let field = decode_string_array(root, BULLET_POINTS_KEY);
    if field.is_defaulted() {
        warn!("Parsed JSON did not contain a '{BULLET_POINTS_KEY}' array property");
        return Err(ClassifiedError::new(ErrorKind::MissingRequiredField, raw));
    }

    let bullet_points = field.into_value();
    if bullet_points.is_empty() {
        warn!("Parsed JSON contained an empty '{BULLET_POINTS_KEY}' array; using placeholder");
        return Ok(BulletPointResult {
            bullet_points: vec![PLACEHOLDER_BULLET.to_string()],
        });
    }

    Ok(BulletPointResult { bullet_points })
}

/// The free-text shape takes the message content as-is; it is not JSON.
pub fn assemble_free_text(raw: &str) -> Result<FreeTextResult, ClassifiedError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ClassifiedError::new(ErrorKind::EmptyUpstreamResponse, raw));
    }
    Ok(FreeTextResult {
        text: text.to_string(),
    })
}

/// Never fails: a missing or mistyped field falls back to its default.
pub fn assemble_comparative_analysis(root: &Value) -> ComparativeAnalysis {
    let identified_job_skills = skill_list(root, "identifiedJobSkills");
    let matched_skills = skill_list(root, "matchedSkills");
    let missing_skills = skill_list(root, "missingSkills");

    let ranked_projects =
        decode_object_array(root, "rankedProjects", decode_ranked_project).into_value();
    let overall_summary = decode_string(root, "overallSummary", DEFAULT_SUMMARY).into_value();

    ComparativeAnalysis {
        identified_job_skills,
        matched_skills,
        missing_skills,
        ranked_projects,
        overall_summary,
    }
}

fn decode_ranked_project(item: &Value) -> RankedProject {
    RankedProject {
        project_name: decode_string(item, "projectName", DEFAULT_PROJECT_NAME).into_value(),
        relevance_justification: decode_string(
            item,
            "relevanceJustification",
            DEFAULT_JUSTIFICATION,
        )
        .into_value(),
    }
}

/// Skill lists behave as sets: repeated entries keep their first position only.
fn skill_list(root: &Value, key: &str) -> Vec<String> {
    let mut skills = decode_string_array(root, key).into_value();
    let mut seen = std::collections::HashSet::new();
    skills.retain(|s| seen.insert(s.clone()));
    skills
}
