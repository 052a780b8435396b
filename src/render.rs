//! Rendering collaborators: Markdown to HTML, then sanitization.
//!
//! Both are injected as trait objects so callers can swap or omit them. A
//! missing renderer degrades to escaped plain text, a missing sanitizer
//! passes the HTML through unchanged.

mod markdown;
mod sanitize;

pub use markdown::MarkdownRenderer;
pub use sanitize::HtmlSanitizer;

use crate::dom::Fragment;
use crate::text::escape_html;

/// Converts page source into HTML.
pub trait Renderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

/// Removes unsafe markup from rendered HTML.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, html: &str) -> String;
}

/// Render `markdown`, or wrap it escaped in `<pre>` when no renderer is available.
pub fn render_markdown(markdown: &str, renderer: Option<&dyn Renderer>) -> String {
    match renderer {
        Some(renderer) => renderer.render(markdown),
        None => format!("<pre>{}</pre>", escape_html(markdown)),
    }
}

/// Produce the article HTML for a page: render first, then sanitize.
pub fn render_article(
    markdown: &str,
    renderer: Option<&dyn Renderer>,
    sanitizer: Option<&dyn Sanitizer>,
) -> String {
    let html = render_markdown(markdown, renderer);
    match sanitizer {
        Some(sanitizer) => sanitizer.sanitize(&html),
        None => html,
    }
}

/// Text content of an HTML fragment.
pub fn plain_text(html: &str) -> String {
    Fragment::parse(html).text_content()
}
