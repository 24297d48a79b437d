use regex::Regex;
use std::sync::LazyLock;

static ACRONYM_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("Regex pattern is hardcoded and valid")
});

static WORD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z0-9])([A-Z])").expect("Regex pattern is hardcoded and valid")
});

/// Characters that cannot appear in a generated identifier
const IDENTIFIER_SEPARATORS: &[char] = &['/', '*', '.', '-', '@', ' '];

/// Converts a string to `snake_case`
///
/// - `camelCase`: `"getUserById"` -> `"get_user_by_id"`
/// - Acronyms: `"XMLHttpRequest"` -> `"xml_http_request"`
/// - Already snake: `"page_size"` -> `"page_size"`
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let text = ACRONYM_BOUNDARY.replace_all(s, "${1}_${2}");
    let text = WORD_BOUNDARY.replace_all(&text, "${1}_${2}");
    text.to_lowercase()
}

/// Variable name used by generated code for a spec name (parameter, property, operation)
#[must_use]
pub fn variable_name(s: &str) -> String {
    to_snake_case(s).replace(IDENTIFIER_SEPARATORS, "_")
}

/// Long option token for a spec name, e.g. `"pageSize"` -> `"--page-size"`
#[must_use]
pub fn option_name(s: &str) -> String {
    format!("--{}", variable_name(s).replace('_', "-"))
}

/// Short model name for a `$ref` target, e.g. `"#/components/schemas/Pet"` -> `"Pet"`
#[must_use]
pub fn short_reference_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Abbreviates text for compact display
#[must_use]
pub fn shorten_text(text: &str, max_len: usize) -> String {
    if text.chars().count() < max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut result: String = text.chars().take(keep).collect();
    result.push_str("...");
    result
}
