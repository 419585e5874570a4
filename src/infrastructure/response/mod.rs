use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

static REASONING_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<reasoning>[\s\S]*?</reasoning>").unwrap());

static CODE_FENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[A-Za-z]*[ \t]*\r?\n?([\s\S]*?)\r?\n?```$").unwrap());

/// Cleans a model reply that should contain a single JSON value.
///
/// Structured-output replies are usually bare JSON already; this only
/// handles the artifacts some models add anyway.
pub fn clean_llm_response(response: &str) -> String {
    let mut cleaned = THINK_TAG_PATTERN.replace_all(response, "").to_string();

    cleaned = REASONING_TAG_PATTERN.replace_all(&cleaned, "").to_string();

    cleaned = cleaned.trim().to_string();

    // Unwrap ```json ... ``` fences
    if let Some(inner) = CODE_FENCE_PATTERN
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
    {
        cleaned = inner.as_str().trim().to_string();
    }

    cleaned
}
