//! Text views returned to the client.

use crate::corpus::{Corpus, Suggestion};
use crate::router::page_href;
use crate::search::{SearchHit, split_terms};
use crate::toc::TocEntry;
use crate::tree::{Folder, TreeNode};
use crate::types::Page;
use std::collections::BTreeSet;
use std::fmt::{self, Write as _};
use std::sync::Arc;

const BREADCRUMB_SEPARATOR: &str = " / ";

/// A rendered page ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub id: String,
    pub title: String,
    /// Path segments and title, joined.
    pub breadcrumbs: String,
    /// Path segments alone, joined; empty for top-level pages.
    pub meta: String,
    /// Window title: `<page> — <site>`.
    pub doc_title: String,
    pub html: String,
    pub toc: Vec<TocEntry>,
    /// Highlight marks inserted for the active query.
    pub marks: usize,
}

impl PageView {
    pub fn new(page: &Page, site_title: &str, html: String, toc: Vec<TocEntry>, marks: usize) -> Self {
        let title = page.display_title().to_string();
        let meta = page.path.join(BREADCRUMB_SEPARATOR);
        let breadcrumbs = page
            .path
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(title.as_str()))
            .collect::<Vec<_>>()
            .join(BREADCRUMB_SEPARATOR);

        Self {
            id: page.id.clone(),
            doc_title: doc_title(Some(&title), site_title),
            title,
            breadcrumbs,
            meta,
            html,
            toc,
            marks,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Page(PageView),
    NotFound { id: String, suggestions: Vec<Suggestion> },
    /// The corpus loaded but holds no pages.
    Empty { site_title: String },
    Loading,
    Error { message: String },
}

/// `<page title> — <site title>`, or the site title alone.
pub fn doc_title(page_title: Option<&str>, site_title: &str) -> String {
    match page_title.filter(|t| !t.is_empty()) {
        Some(title) => format!("{} — {}", title, site_title),
        None => site_title.to_string(),
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write_page(f, page),
            Self::NotFound { id, suggestions } => {
                writeln!(f, "Page not found: '{}'", id)?;
                if !suggestions.is_empty() {
                    writeln!(f, "\nDid you mean:")?;
                    for s in suggestions {
                        writeln!(f, "  • {} ({})", s.title, s.id)?;
                    }
                }
                Ok(())
            }
            Self::Empty { site_title } => {
                writeln!(f, "{}", site_title)?;
                writeln!(f, "\nNo pages found. Check the docs index and bundle files.")
            }
            Self::Loading => writeln!(f, "Documentation is still loading, try again shortly."),
            Self::Error { message } => writeln!(f, "Failed to load documentation: {}", message),
        }
    }
}

fn write_page(f: &mut fmt::Formatter<'_>, page: &PageView) -> fmt::Result {
    writeln!(f, "# {}", page.title)?;
    writeln!(f, "{}", page.breadcrumbs)?;
    if !page.meta.is_empty() {
        writeln!(f, "Section: {}", page.meta)?;
    }
    writeln!(f, "Title: {}", page.doc_title)?;
    writeln!(f, "Link: {}", page_href(&page.id))?;
    if page.marks > 0 {
        writeln!(f, "Highlights: {}", page.marks)?;
    }

    if !page.toc.is_empty() {
        writeln!(f, "\nContents:")?;
        for entry in &page.toc {
            let indent = if entry.level == 3 { "    " } else { "  " };
            writeln!(f, "{}• {} (#{})", indent, entry.text, entry.id)?;
        }
    }

    writeln!(f, "\n---\n{}", page.html.trim_end())
}

/// Ranked hits for one query, displayed as a numbered list of
/// `<path> / <title>` labels with snippets.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub corpus: Arc<Corpus>,
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_search_results(f, &self.query, &self.hits, &self.corpus)
    }
}

fn write_search_results(
    output: &mut impl fmt::Write,
    query: &str,
    hits: &[SearchHit],
    corpus: &Corpus,
) -> fmt::Result {
    if split_terms(query).is_empty() {
        return writeln!(output, "Enter a search term of at least 2 characters.");
    }
    if hits.is_empty() {
        return writeln!(output, "No results for '{}'.", query.trim());
    }

    writeln!(output, "Results for '{}' ({}):\n", query.trim(), hits.len())?;
    for (i, hit) in hits.iter().enumerate() {
        let Some(page) = corpus.page(&hit.id) else {
            continue;
        };
        let label = page
            .path
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(page.display_title()))
            .collect::<Vec<_>>()
            .join(BREADCRUMB_SEPARATOR);

        writeln!(output, "{}. {} [{}] (score {})", i + 1, label, hit.id, hit.score)?;
        if !hit.snippet.is_empty() {
            writeln!(output, "   {}", hit.snippet)?;
        }
    }
    Ok(())
}

/// Navigation tree with folder state and the active page.
pub fn format_navigation(
    corpus: &Corpus,
    open_folders: &BTreeSet<String>,
    collapsed: bool,
    current: Option<&str>,
) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", corpus.site_title());
    if collapsed {
        let _ = writeln!(output, "(navigation collapsed)");
        return output;
    }
    let _ = write_folder(&mut output, corpus.tree(), open_folders, current, 0);
    output
}

fn write_folder(
    output: &mut String,
    folder: &Folder,
    open_folders: &BTreeSet<String>,
    current: Option<&str>,
    depth: usize,
) -> fmt::Result {
    let indent = "  ".repeat(depth);
    for child in &folder.children {
        match child {
            TreeNode::Folder(sub) => {
                let open = open_folders.contains(&sub.key);
                let marker = if open { '▾' } else { '▸' };
                writeln!(output, "{}{} {} [{}]", indent, marker, sub.title, sub.key)?;
                if open {
                    write_folder(output, sub, open_folders, current, depth + 1)?;
                }
            }
            TreeNode::Page(page) => {
                let marker = if current == Some(page.id.as_str()) { '•' } else { ' ' };
                writeln!(output, "{}{} {} ({})", indent, marker, page.display_title(), page.id)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_ORDER, DocSet};
    use assert2::check;
    use rstest::rstest;

    fn page(id: &str, title: &str, path: &[&str]) -> Page {
        Page {
            id: id.to_string(),
            title: title.to_string(),
            path: path.iter().map(|s| s.to_string()).collect(),
            order: DEFAULT_ORDER,
            content: format!("Text about {}", title.to_lowercase()),
        }
    }

    fn corpus() -> Corpus {
        Corpus::build(
            DocSet {
                site_title: "Handbook".into(),
                pages: vec![
                    page("install", "Install Guide", &["Guides"]),
                    page("deep", "Deep Dive", &["Guides", "Advanced"]),
                    page("home", "Home", &[]),
                ],
            },
            None,
            "en",
        )
    }

    #[rstest]
    #[case(Some("Install"), "Install — Handbook")]
    #[case(Some(""), "Handbook")]
    #[case(None, "Handbook")]
    fn test_doc_title(#[case] page: Option<&str>, #[case] expected: &str) {
        check!(doc_title(page, "Handbook") == expected);
    }

    #[test]
    fn test_page_view_fields() {
        let page = page("deep", "Deep Dive", &["Guides", "Advanced"]);
        let view = PageView::new(&page, "Handbook", "<p>x</p>".into(), vec![], 0);

        check!(view.breadcrumbs == "Guides / Advanced / Deep Dive");
        check!(view.meta == "Guides / Advanced");
        check!(view.doc_title == "Deep Dive — Handbook");

        let text = View::Page(view).to_string();
        check!(text.starts_with("# Deep Dive\nGuides / Advanced / Deep Dive\n"));
        check!(text.contains("Link: #/page/deep"));
        check!(!text.contains("Highlights"));
        check!(text.ends_with("<p>x</p>\n"));
    }

    #[test]
    fn test_navigation_markers() {
        let corpus = corpus();
        let open = BTreeSet::from(["guides".to_string()]);
        let nav = format_navigation(&corpus, &open, false, Some("install"));

        check!(
            nav == "Handbook\n\
                    ▾ Guides [guides]\n  \
                    ▸ Advanced [guides/advanced]\n  \
                    • Install Guide (install)\n  \
                    Home (home)\n"
        );
    }

    #[test]
    fn test_collapsed_navigation() {
        let nav = format_navigation(&corpus(), &BTreeSet::new(), true, None);
        check!(nav == "Handbook\n(navigation collapsed)\n");
    }

    fn results(query: &str, hits: Vec<SearchHit>, corpus: &Arc<Corpus>) -> String {
        SearchResults {
            query: query.to_string(),
            hits,
            corpus: Arc::clone(corpus),
        }
        .to_string()
    }

    #[test]
    fn test_search_results_format() {
        let corpus = Arc::new(corpus());
        let hits = corpus.index().search("dive", 12, 90);
        let text = results("dive", hits, &corpus);

        check!(text.contains("1. Guides / Advanced / Deep Dive [deep] (score 42)"));
        check!(text.contains("   Text about deep dive"));
        check!(results("x", vec![], &corpus).starts_with("Enter a search term"));
        check!(results("nothing", vec![], &corpus) == "No results for 'nothing'.\n");
    }

    #[test]
    fn test_not_found_lists_suggestions() {
        let view = View::NotFound {
            id: "instal".into(),
            suggestions: corpus().suggest("instal", 3),
        };
        let text = view.to_string();
        check!(text.starts_with("Page not found: 'instal'"));
        check!(text.contains("• Install Guide (install)"));
    }
}
