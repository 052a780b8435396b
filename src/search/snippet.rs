//! Excerpts of page text around a search match.

use crate::text::{collapse_whitespace, find_chars, fold_chars};

/// Chars kept on each side of the match.
pub const DEFAULT_SNIPPET_RADIUS: usize = 90;

const ELLIPSIS: &str = "…";

/// Cut a window of `radius` chars around the first case-insensitive
/// occurrence of `term` in `text`.
///
/// Whitespace in the window is collapsed and trimmed, and an ellipsis marks
/// each side where the text was cut. Returns an empty string when `term` does
/// not occur in `text`.
pub fn make_snippet(text: &str, term: &str, radius: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let needle = fold_chars(term);
    let Some(index) = find_chars(&fold_chars(text), &needle, 0) else {
        return String::new();
    };

    let start = index.saturating_sub(radius);
    let end = (index + needle.len() + radius).min(chars.len());
    let prefix = if start > 0 { ELLIPSIS } else { "" };
    let suffix = if end < chars.len() { ELLIPSIS } else { "" };

    let window: String = chars[start..end].iter().collect();
    format!("{}{}{}", prefix, collapse_whitespace(&window).trim(), suffix)
}
