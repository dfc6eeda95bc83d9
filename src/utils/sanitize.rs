// Sanitization utilities

/// Truncate text to a maximum number of characters
///
/// Counts characters rather than bytes so CJK text is never split mid-codepoint.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Collapse runs of whitespace (including newlines) into single spaces
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
