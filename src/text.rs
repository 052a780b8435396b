//! String utilities shared by the loader, tree builder, search and views.

use icu_collator::CollatorBorrowed;
use icu_collator::options::CollatorOptions;
use icu_locale_core::Locale;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Everything that is not an ASCII word char, a hyphen, or lowercase Cyrillic.
static NON_SLUG_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-а-яё]").expect("valid slug regex"));

/// Converts a title or path segment into a URL-friendly slug.
///
/// - `"Install Guide"` becomes `"install-guide"`
/// - `"  Руководство  пользователя "` becomes `"руководство-пользователя"`
/// - punctuation is dropped: `"What's new?"` becomes `"whats-new"`
pub fn slugify(s: &str) -> String {
    let lowered = s.trim().to_lowercase();
    let dashed = WHITESPACE_RUN.replace_all(&lowered, "-");
    NON_SLUG_CHAR.replace_all(&dashed, "").into_owned()
}

/// Collapses every whitespace run into a single space.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").into_owned()
}

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Lowercases a single char, keeping it unchanged when its lowercase form
/// expands to several chars.
fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Case-folds `text` one char at a time.
///
/// The result has exactly one entry per char of `text`, so an index found in
/// the folded form is also a valid char index into the source.
pub fn fold_chars(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

/// Finds `needle` in `hay` at or after char index `from`.
pub fn find_chars(hay: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || needle.len() > hay.len() {
        return None;
    }
    (from..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()] == *needle)
}

/// Locale-aware string ordering used for navigation sorting.
///
/// Wraps an ICU collator for the site language, so accents, case and
/// language-specific letters (`å` in Swedish, `ё` in Russian) sort the way a
/// reader of that language expects. Strings that collate equal fall back to
/// code point order.
pub struct Collator {
    inner: Option<CollatorBorrowed<'static>>,
}

impl Collator {
    /// Create a collator for a BCP 47 language tag such as `"en"` or `"ru-RU"`.
    ///
    /// Unparseable tags use the root collation.
    pub fn new(lang: &str) -> Self {
        let locale = lang.replace('_', "-").parse::<Locale>().unwrap_or_else(|err| {
            tracing::debug!(lang, %err, "Unparseable language tag, using root collation");
            Locale::UNKNOWN
        });

        let inner = match icu_collator::Collator::try_new(locale.into(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                tracing::warn!(lang, %err, "No collation data, sorting by code point");
                None
            }
        };
        Self { inner }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.inner
            .as_ref()
            .map_or(Ordering::Equal, |collator| collator.compare(a, b))
            .then_with(|| a.cmp(b))
    }
}

impl Default for Collator {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Debug for Collator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collator")
            .field("icu", &self.inner.is_some())
            .finish()
    }
}
