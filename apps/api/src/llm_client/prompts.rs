// Shared prompt constants and prompt-building utilities.
// Each call site defines its own prompts in portfolio/prompts.rs.
// This file contains cross-cutting prompt fragments.

/// Instruction appended to every prompt that expects a JSON object back.
/// Models do not reliably honor it; `crate::interpret` copes either way.
pub const JSON_ONLY_INSTRUCTION: &str = "**CRITICAL INSTRUCTION: Respond ONLY with a valid JSON object. \
    Do not include any other text, explanations, or markdown code blocks like ```json.**";

/// Truncates `text` to at most `max_chars` characters, appending `...` when cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Fills `{name}` placeholders in `template` in a single pass.
///
/// Substituted values are never rescanned, so user text that happens to
/// contain `{owner}` or `{projects}` reaches the model unchanged. Braces that
/// do not name a known placeholder are kept as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after_brace = &rest[start + 1..];
        let hit = values.iter().find_map(|(name, value)| {
            after_brace
                .strip_prefix(name)?
                .strip_prefix('}')
                .map(|remaining| (*value, remaining))
        });
        match hit {
            Some((value, remaining)) => {
                out.push_str(value);
                rest = remaining;
            }
            None => {
                out.push('{');
                rest = after_brace;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_with_ellipsis("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_exact_length_unchanged() {
        assert_eq!(truncate_with_ellipsis("abcde", 5), "abcde");
    }

    #[test]
    fn test_truncate_long_text_appends_ellipsis() {
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc...");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_with_ellipsis("ééé", 2), "éé...");
    }

    #[test]
    fn test_fill_template_replaces_named_placeholders() {
        let out = fill_template("Hi {name}, see {repo}.", &[("name", "Ada"), ("repo", "ledger")]);
        assert_eq!(out, "Hi Ada, see ledger.");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let out = fill_template(
            "JD: {job}\nBy: {owner}",
            &[("job", "Mention {owner} and {job}"), ("owner", "octocat")],
        );
        assert_eq!(out, "JD: Mention {owner} and {job}\nBy: octocat");
    }

    #[test]
    fn test_fill_template_keeps_unknown_braces() {
        let out = fill_template(r#"{"a": {x}} {"#, &[("x", "1")]);
        assert_eq!(out, r#"{"a": 1} {"#);
    }
}
