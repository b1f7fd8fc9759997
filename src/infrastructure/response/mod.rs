use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

static MULTIPLE_NEWLINES_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Cleans a generation response by removing common artifacts some models
/// prepend to the requested payload.
pub fn clean_llm_response(response: &str) -> String {
    let mut cleaned = response.to_string();

    cleaned = THINK_TAG_PATTERN.replace_all(&cleaned, "").to_string();
    cleaned = cleaned.trim().to_string();
    cleaned = MULTIPLE_NEWLINES_PATTERN
        .replace_all(&cleaned, "\n\n")
        .to_string();

    cleaned
}

/// Strips a surrounding Markdown code fence when the model wraps the JSON
/// payload in one despite the JSON response mime type.
pub fn strip_code_fence(value: &str) -> String {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix("```json") {
        return stripped.trim().trim_end_matches("```").trim().to_string();
    }
    if let Some(stripped) = trimmed.strip_prefix("```") {
        return stripped.trim().trim_end_matches("```").trim().to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_think_tags() {
        let input = "<think>Some reasoning here</think>The actual response";
        assert_eq!(clean_llm_response(input), "The actual response");
    }

    #[test]
    fn test_clean_multiple_newlines() {
        let input = "Line 1\n\n\n\n\nLine 2";
        assert_eq!(clean_llm_response(input), "Line 1\n\nLine 2");
    }

    #[test]
    fn test_clean_preserves_normal_text() {
        let input = "{\"scenarios\": []}";
        assert_eq!(clean_llm_response(input), "{\"scenarios\": []}");
    }

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_bare_fence() {
        assert_eq!(strip_code_fence("```\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn test_strip_leaves_unfenced_text() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }
}
