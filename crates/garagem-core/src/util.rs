//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Validate and normalize a service base URL.
///
/// Trims whitespace and trailing slashes, rejects empty values and
/// non-http(s) schemes.
pub fn normalize_base_url(raw: &str) -> std::result::Result<String, String> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err("base URL must not be empty".to_string());
    }
    if !is_http_url(&base) {
        return Err("base URL must include http:// or https://".to_string());
    }
    Ok(base)
}
