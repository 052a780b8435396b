//! Table of contents extraction for rendered articles.

use crate::dom::{Fragment, Node};
use crate::text::slugify;
use serde::Serialize;

/// One `h2`/`h3` heading of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Anchor id of the heading element.
    pub id: String,
    pub text: String,
    /// 2 or 3.
    pub level: u8,
}

/// Collect `h2`/`h3` headings in document order, giving each one an `id`.
///
/// Headings keep an existing `id`; others get `h-<index>-<slug>` where index
/// counts headings from zero.
pub fn build_toc(fragment: &mut Fragment) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    visit(&mut fragment.nodes, &mut entries);
    entries
}

fn visit(nodes: &mut [Node], entries: &mut Vec<TocEntry>) {
    for node in nodes {
        let Node::Element(element) = node else { continue };

        let level = match element.tag.as_str() {
            "h2" => 2,
            "h3" => 3,
            _ => {
                visit(&mut element.children, entries);
                continue;
            }
        };

        let text = element.text_content();
        let id = match element.attr("id").filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => {
                let id = format!("h-{}-{}", entries.len(), slugify(&text));
                element.set_attr("id", id.clone());
                id
            }
        };
        entries.push(TocEntry { id, text, level });
    }
}
