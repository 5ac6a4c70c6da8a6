//! Small text helpers shared by the classifier and conversation assembly.

/// Keeps at most `max_chars` characters, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Collapses whitespace runs to single spaces and caps the result at `limit`
/// characters, appending `...` when something was cut.
pub fn summarize_text(text: &str, limit: usize) -> String {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.chars().count() > limit {
        format!("{}...", truncate_chars(&cleaned, limit))
    } else {
        cleaned
    }
}
