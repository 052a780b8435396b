//! Markdown to HTML rendering

use super::Renderer;
use crate::text::escape_html;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

/// CommonMark renderer with tables and strikethrough enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);

        let parser = CodeBlocks::new(Parser::new_ext(markdown, options));

        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        html_output
    }
}

/// Iterator adapter that emits fenced code blocks as a single
/// `<pre><code class="language-x">` event.
struct CodeBlocks<'a, I> {
    inner: I,
    in_code_block: bool,
    code_lang: Option<String>,
    code_buffer: String,
    _marker: std::marker::PhantomData<Event<'a>>,
}

impl<'a, I> CodeBlocks<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    const fn new(inner: I) -> Self {
        Self {
            inner,
            in_code_block: false,
            code_lang: None,
            code_buffer: String::new(),
            _marker: std::marker::PhantomData,
        }
    }

    fn code_html(&self) -> String {
        let lang_class = self
            .code_lang
            .as_deref()
            .map(|l| format!(" class=\"language-{}\"", escape_html(l)))
            .unwrap_or_default();

        format!(
            "<pre><code{}>{}</code></pre>\n",
            lang_class,
            escape_html(&self.code_buffer)
        )
    }
}

impl<'a, I> Iterator for CodeBlocks<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let event = self.inner.next()?;

            match &event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    self.in_code_block = true;
                    self.code_buffer.clear();
                    self.code_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            let lang = lang.split_whitespace().next().unwrap_or_default();
                            (!lang.is_empty()).then(|| lang.to_string())
                        }
                        CodeBlockKind::Indented => None,
                    };
                }
                Event::End(TagEnd::CodeBlock) => {
                    self.in_code_block = false;
                    return Some(Event::Html(self.code_html().into()));
                }
                Event::Text(text) if self.in_code_block => {
                    self.code_buffer.push_str(text);
                }
                _ => return Some(event),
            }
        }
    }
}
