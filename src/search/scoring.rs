//! Search relevance weights.
//!
//! A page's score is the sum, over every query term, of weighted occurrence
//! counts in each indexed field. Counts are capped per field so that one
//! repetitive field cannot dominate.

/// Weight and occurrence cap for one indexed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldWeight {
    pub weight: u32,
    pub cap: usize,
}

pub const TITLE: FieldWeight = FieldWeight { weight: 40, cap: 3 };
pub const PATH: FieldWeight = FieldWeight { weight: 10, cap: 3 };
pub const ID: FieldWeight = FieldWeight { weight: 8, cap: 3 };
pub const BODY: FieldWeight = FieldWeight { weight: 2, cap: 20 };

/// Non-overlapping occurrences of `needle` in `haystack`.
///
/// After each match the scan resumes past it, so `"aa"` occurs twice in
/// `"aaaa"`, not three times.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Contribution of one field to the score for one term.
pub fn field_score(field: FieldWeight, haystack: &str, term: &str) -> u32 {
    let capped = count_occurrences(haystack, term).min(field.cap);
    field
        .weight
        .saturating_mul(u32::try_from(capped).unwrap_or(u32::MAX))
}
