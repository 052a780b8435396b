//! The loaded documentation corpus: sorted pages, id lookup, navigation tree
//! and search index, built once per load.

use crate::render::Renderer;
use crate::search::{SearchIndex, build_index};
use crate::text::Collator;
use crate::tree::{Folder, build_tree, compare_pages};
use crate::types::{DocSet, Page};
use ahash::AHashMap;
use rapidfuzz::distance::jaro_winkler;
use std::sync::Arc;

/// Minimum Jaro-Winkler similarity for a page to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// A page suggested for an unknown id.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub score: f64,
}

#[derive(Debug)]
pub struct Corpus {
    site_title: String,
    /// Pages by order, then collated title.
    pages: Vec<Arc<Page>>,
    by_id: AHashMap<String, Arc<Page>>,
    tree: Folder,
    index: SearchIndex,
}

impl Corpus {
    /// Sort the loaded pages and derive the lookup table, tree and index.
    pub fn build(set: DocSet, renderer: Option<&dyn Renderer>, lang: &str) -> Self {
        let collator = Collator::new(lang);
        let mut pages: Vec<Arc<Page>> = set.pages.into_iter().map(Arc::new).collect();
        pages.sort_by(|a, b| compare_pages(a, b, &collator));

        let by_id = pages
            .iter()
            .map(|page| (page.id.clone(), Arc::clone(page)))
            .collect();
        let tree = build_tree(&pages, &collator);
        let index = build_index(&pages, renderer);

        tracing::info!("Corpus '{}' ready with {} pages", set.site_title, pages.len());

        Self {
            site_title: set.site_title,
            pages,
            by_id,
            tree,
            index,
        }
    }

    pub fn site_title(&self) -> &str {
        &self.site_title
    }

    pub fn pages(&self) -> &[Arc<Page>] {
        &self.pages
    }

    pub fn page(&self, id: &str) -> Option<&Arc<Page>> {
        self.by_id.get(id)
    }

    /// Page shown when no page is requested.
    pub fn first_page(&self) -> Option<&Arc<Page>> {
        self.pages.first()
    }

    pub fn tree(&self) -> &Folder {
        &self.tree
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Pages whose id or title resembles `target`, best first.
    pub fn suggest(&self, target: &str, limit: usize) -> Vec<Suggestion> {
        let target = target.to_lowercase();
        let mut suggestions: Vec<Suggestion> = self
            .pages
            .iter()
            .map(|page| {
                let by_id = jaro_winkler::similarity(target.chars(), page.id.to_lowercase().chars());
                let by_title = jaro_winkler::similarity(
                    target.chars(),
                    page.display_title().to_lowercase().chars(),
                );
                Suggestion {
                    id: page.id.clone(),
                    title: page.display_title().to_string(),
                    score: by_id.max(by_title),
                }
            })
            .filter(|s| s.score >= SUGGESTION_THRESHOLD)
            .collect();

        suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
        suggestions.truncate(limit);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MarkdownRenderer;
    use crate::tree::TreeNode;
    use crate::types::DEFAULT_ORDER;
    use assert2::check;

    fn page(id: &str, title: &str, path: &[&str], order: f64) -> Page {
        Page {
            id: id.to_string(),
            title: title.to_string(),
            path: path.iter().map(|s| s.to_string()).collect(),
            order,
            content: format!("About {}", title),
        }
    }

    fn corpus() -> Corpus {
        let set = DocSet {
            site_title: "Handbook".into(),
            pages: vec![
                page("zeta", "Zeta", &[], DEFAULT_ORDER),
                page("install", "Install Guide", &["Guides"], 2.0),
                page("alpha", "alpha", &[], DEFAULT_ORDER),
                page("welcome", "Welcome", &[], 1.0),
            ],
        };
        Corpus::build(set, Some(&MarkdownRenderer), "en")
    }

    #[test]
    fn test_pages_sorted_by_order_then_title() {
        let corpus = corpus();
        let ids: Vec<&str> = corpus.pages().iter().map(|p| p.id.as_str()).collect();

        check!(ids == vec!["welcome", "install", "alpha", "zeta"]);
        check!(corpus.first_page().map(|p| p.id.as_str()) == Some("welcome"));
        check!(corpus.index().len() == 4);
        check!(corpus.index().entries()[0].id == "welcome");
    }

    #[test]
    fn test_lookup_and_tree() {
        let corpus = corpus();

        check!(corpus.page("install").map(|p| p.title.as_str()) == Some("Install Guide"));
        check!(corpus.page("missing").is_none());
        check!(matches!(&corpus.tree().children[0], TreeNode::Folder(f) if f.key == "guides"));
    }

    #[test]
    fn test_suggest_similar_pages() {
        let corpus = corpus();
        let suggestions = corpus.suggest("instal", 3);

        check!(!suggestions.is_empty());
        check!(suggestions[0].id == "install");
        check!(corpus.suggest("qqqqqqqqqqqq", 3).is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::build(
            DocSet {
                site_title: "Empty".into(),
                pages: vec![],
            },
            None,
            "en",
        );
        check!(corpus.pages().is_empty());
        check!(corpus.first_page().is_none());
        check!(corpus.tree().children.is_empty());
    }
}
