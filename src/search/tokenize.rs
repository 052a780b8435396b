//! Query normalization and tokenization.

use crate::text::collapse_whitespace;

/// Tokens shorter than this many chars are ignored.
const MIN_TOKEN_LENGTH: usize = 2;

/// Trim, lowercase and collapse whitespace runs to single spaces.
pub fn normalize_query(query: &str) -> String {
    collapse_whitespace(query.trim()).to_lowercase()
}

/// Split a query into search terms.
///
/// An empty or all-short query yields no terms, which callers treat as
/// "no results" rather than "match everything".
pub fn split_terms(query: &str) -> Vec<String> {
    normalize_query(query)
        .split(' ')
        .filter(|t| t.chars().count() >= MIN_TOKEN_LENGTH)
        .map(str::to_owned)
        .collect()
}
