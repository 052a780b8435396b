//! Per-page lexical index.

use crate::render::{Renderer, plain_text, render_markdown};
use crate::types::Page;
use std::sync::Arc;

/// Precomputed search fields for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub id: String,
    pub title: String,
    /// Path segments joined with `" / "`.
    pub path_text: String,
    /// Text content of the rendered page.
    pub plain_text: String,

    pub id_lower: String,
    pub title_lower: String,
    pub path_lower: String,
    pub text_lower: String,
}

impl IndexEntry {
    pub fn new(page: &Page, plain_text: String) -> Self {
        let title = page.display_title().to_string();
        let path_text = page.path.join(" / ");
        Self {
            id_lower: page.id.to_lowercase(),
            title_lower: title.to_lowercase(),
            path_lower: path_text.to_lowercase(),
            text_lower: plain_text.to_lowercase(),
            id: page.id.clone(),
            title,
            path_text,
            plain_text,
        }
    }
}

/// Search index with exactly one entry per page, in page order.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<IndexEntry> for SearchIndex {
    fn from_iter<T: IntoIterator<Item = IndexEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Index every page: render its content, strip the markup, and store
/// lowercase projections of id, title, path and body.
pub fn build_index(pages: &[Arc<Page>], renderer: Option<&dyn Renderer>) -> SearchIndex {
    let start = std::time::Instant::now();
    let index: SearchIndex = pages
        .iter()
        .map(|page| {
            let html = render_markdown(&page.content, renderer);
            IndexEntry::new(page, plain_text(&html))
        })
        .collect();
    tracing::debug!("Indexed {} pages in {:?}", index.len(), start.elapsed());
    index
}
