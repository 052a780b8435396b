//! Query execution against the search index.

use super::index::{IndexEntry, SearchIndex};
use super::scoring::{BODY, ID, PATH, TITLE, field_score};
use super::snippet::make_snippet;
use super::tokenize::{normalize_query, split_terms};
use serde::Serialize;

/// Results returned when the caller gives no limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 12;

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Id of the matching page.
    pub id: String,
    pub score: u32,
    /// Excerpt around the first term, empty when only metadata matched.
    pub snippet: String,
}

impl SearchIndex {
    /// Rank pages against `query`.
    ///
    /// Terms shorter than two chars are ignored; a query without usable terms
    /// matches nothing. Equal scores keep index order.
    pub fn search(&self, query: &str, limit: usize, radius: usize) -> Vec<SearchHit> {
        let terms = split_terms(&normalize_query(query));
        let Some(first) = terms.first() else {
            return Vec::new();
        };

        let mut scored: Vec<(&IndexEntry, u32)> = self
            .entries()
            .iter()
            .map(|entry| (entry, score_entry(entry, &terms)))
            .filter(|(_, score)| *score > 0)
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(limit);

        tracing::trace!("Query {:?} matched {} pages", query, scored.len());

        scored
            .into_iter()
            .map(|(entry, score)| SearchHit {
                id: entry.id.clone(),
                score,
                snippet: make_snippet(&entry.plain_text, first, radius),
            })
            .collect()
    }
}

fn score_entry(entry: &IndexEntry, terms: &[String]) -> u32 {
    terms
        .iter()
        .map(|term| {
            field_score(TITLE, &entry.title_lower, term)
                + field_score(PATH, &entry.path_lower, term)
                + field_score(ID, &entry.id_lower, term)
                + field_score(BODY, &entry.text_lower, term)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::snippet::DEFAULT_SNIPPET_RADIUS;
    use crate::types::Page;
    use assert2::check;
    use rstest::{fixture, rstest};

    fn entry(id: &str, title: &str, path: &[&str], body: &str) -> IndexEntry {
        let page = Page {
            id: id.to_string(),
            title: title.to_string(),
            path: path.iter().map(|s| s.to_string()).collect(),
            order: 1.0,
            content: String::new(),
        };
        IndexEntry::new(&page, body.to_string())
    }

    #[fixture]
    fn index() -> SearchIndex {
        [
            entry("intro", "Introduction", &["Guides"], "Welcome to the setup guide."),
            entry("setup", "Setup", &["Guides"], "Run setup twice: setup, setup."),
            entry("faq", "FAQ", &["Reference"], "Nothing about installs here."),
            entry("cli-setup", "Commands", &["Reference"], "Flags."),
        ]
        .into_iter()
        .collect()
    }

    fn ids(hits: &[SearchHit]) -> Vec<&str> {
        hits.iter().map(|h| h.id.as_str()).collect()
    }

    #[rstest]
    fn test_ranking(index: SearchIndex) {
        let hits = index.search("  SETUP ", DEFAULT_SEARCH_LIMIT, DEFAULT_SNIPPET_RADIUS);

        // setup: title 40 + id 8 + body 3*2; cli-setup: id 8; intro: body 2
        check!(ids(&hits) == vec!["setup", "cli-setup", "intro"]);
        check!(hits[0].score == 54);
        check!(hits[1].score == 8);
        check!(hits[1].snippet.is_empty());
        check!(hits[2].snippet == "Welcome to the setup guide.");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("a b c")]
    fn test_no_usable_terms(index: SearchIndex, #[case] query: &str) {
        check!(index.search(query, DEFAULT_SEARCH_LIMIT, DEFAULT_SNIPPET_RADIUS).is_empty());
    }

    #[rstest]
    fn test_limit_truncates(index: SearchIndex) {
        let hits = index.search("setup", 1, DEFAULT_SNIPPET_RADIUS);
        check!(ids(&hits) == vec!["setup"]);
    }

    #[rstest]
    fn test_scores_sum_across_terms(index: SearchIndex) {
        let hits = index.search("guides faq", DEFAULT_SEARCH_LIMIT, DEFAULT_SNIPPET_RADIUS);

        // faq: title 40 + id 8; intro and setup: path 10
        check!(ids(&hits) == vec!["faq", "intro", "setup"]);
        check!(hits.iter().map(|h| h.score).collect::<Vec<_>>() == vec![48, 10, 10]);
        // snippet follows the first term only
        check!(hits[0].snippet.is_empty());
    }

    #[test]
    fn test_ties_keep_index_order() {
        let index: SearchIndex = ["c", "a", "b"]
            .iter()
            .map(|id| entry(id, "Same", &[], "token"))
            .collect();
        let hits = index.search("token", DEFAULT_SEARCH_LIMIT, DEFAULT_SNIPPET_RADIUS);
        check!(ids(&hits) == vec!["c", "a", "b"]);
    }
}
