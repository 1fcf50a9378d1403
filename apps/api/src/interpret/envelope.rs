//! Envelope Extractor: isolates the most plausible JSON object in raw model output.
//!
//! Models wrap JSON in prose and markdown fences no matter what the prompt
//! says. Taking the span from the first `{` to the last `}` strips both
//! without having to recognise either.

use tracing::{debug, warn};

use crate::interpret::classify::{ClassifiedError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Found,
    NotFound,
}

/// Candidate JSON text borrowed from the raw response. Not guaranteed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    pub text: &'a str,
    pub boundary: Boundary,
}

/// Trims `raw` and returns the inclusive `{ ... }` span, or the whole trimmed
/// text when no brace pair exists.
///
/// Fails only on empty (or whitespace-only) input.
pub fn extract_envelope(raw: &str) -> Result<Envelope<'_>, ClassifiedError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClassifiedError::new(ErrorKind::EmptyUpstreamResponse, raw));
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if end > start => {
            let text = &trimmed[start..=end];
            debug!("Extracted potential JSON: {text}");
            Ok(Envelope {
                text,
                boundary: Boundary::Found,
            })
        }
        _ => {
            // Still parsed downstream: the trimmed text may be bare JSON (e.g. an array).
            warn!(
                advisory = ?ErrorKind::NoJsonObjectFound,
                "Could not locate JSON object boundaries in AI response"
            );
            Ok(Envelope {
                text: trimmed,
                boundary: Boundary::NotFound,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str = r#"{"bulletPoints":["Built X"]}"#;

    #[test]
    fn test_bare_json_is_its_own_envelope() {
        let env = extract_envelope(BARE).unwrap();
        assert_eq!(env.text, BARE);
        assert_eq!(env.boundary, Boundary::Found);
    }

    #[test]
    fn test_fenced_json_with_prose_matches_bare() {
        let fenced = format!("Sure, here you go:\n```json\n{BARE}\n```\nLet me know!");
        assert_eq!(extract_envelope(&fenced).unwrap().text, BARE);

        let untagged = format!("```\n{BARE}\n```");
        assert_eq!(extract_envelope(&untagged).unwrap().text, BARE);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let padded = format!("\n\n   {BARE}  \t\n");
        assert_eq!(extract_envelope(&padded).unwrap().text, BARE);
    }

    #[test]
    fn test_nested_objects_span_first_to_last_brace() {
        let raw = r#"note {"a":{"b":1}} end"#;
        assert_eq!(extract_envelope(raw).unwrap().text, r#"{"a":{"b":1}}"#);
    }

    #[test]
    fn test_empty_input_is_classified() {
        let err = extract_envelope("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyUpstreamResponse);
    }

    #[test]
    fn test_whitespace_only_input_is_classified() {
        let err = extract_envelope("  \n\t ").unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyUpstreamResponse);
    }

    #[test]
    fn test_no_braces_falls_back_to_trimmed_text() {
        let env = extract_envelope("  [1, 2, 3] ").unwrap();
        assert_eq!(env.text, "[1, 2, 3]");
        assert_eq!(env.boundary, Boundary::NotFound);
    }

    #[test]
    fn test_reversed_braces_fall_back_to_trimmed_text() {
        let env = extract_envelope("} nothing here {").unwrap();
        assert_eq!(env.text, "} nothing here {");
        assert_eq!(env.boundary, Boundary::NotFound);
    }

    #[test]
    fn test_single_open_brace_is_not_a_boundary() {
        let env = extract_envelope("{").unwrap();
        assert_eq!(env.boundary, Boundary::NotFound);
    }
}
