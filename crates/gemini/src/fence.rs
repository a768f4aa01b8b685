//! Cleanup for model output that wraps its JSON in a markdown code block.

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Returns the trimmed body of a markdown code fence, optionally tagged `json`.
///
/// Text that is not fenced, or whose fence body is empty, comes back trimmed
/// but otherwise untouched.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(inner) = trimmed
        .strip_prefix(FENCE)
        .and_then(|rest| rest.strip_suffix(FENCE))
    else {
        return trimmed;
    };

    let inner = strip_json_tag(inner).trim();
    if inner.is_empty() { trimmed } else { inner }
}

fn strip_json_tag(text: &str) -> &str {
    match text.get(..JSON_TAG.len()) {
        Some(tag) if tag.eq_ignore_ascii_case(JSON_TAG) => &text[JSON_TAG.len()..],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"signal":"BUY"}"#;

    #[test]
    fn test_tagged_fence() {
        let text = format!("```json\n{BODY}\n```");
        assert_eq!(strip_code_fence(&text), BODY);
    }

    #[test]
    fn test_untagged_fence() {
        let text = format!("```\n{BODY}\n```");
        assert_eq!(strip_code_fence(&text), BODY);
    }

    #[test]
    fn test_fence_with_surrounding_whitespace_and_upper_tag() {
        let text = format!("  \n```JSON   {BODY}  ```\n\n");
        assert_eq!(strip_code_fence(&text), BODY);
    }

    #[test]
    fn test_unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fence(&format!(" {BODY}\n")), BODY);
        assert_eq!(strip_code_fence("not json at all"), "not json at all");
    }

    #[test]
    fn test_unclosed_or_empty_fence_is_left_alone() {
        assert_eq!(strip_code_fence("```json\n{}"), "```json\n{}");
        assert_eq!(strip_code_fence("```"), "```");
        assert_eq!(strip_code_fence("``````"), "``````");
        assert_eq!(strip_code_fence("```json```"), "```json```");
    }
}
