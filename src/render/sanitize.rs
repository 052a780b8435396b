//! HTML sanitization for rendered articles.

use super::Sanitizer;
use crate::dom::{Element, Fragment, Node};

/// Elements removed together with their content.
const BLOCKED_ELEMENTS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "frame", "frameset", "template",
    "base", "meta", "link",
];

/// Attributes whose value is a URL.
const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "xlink:href"];

/// Drops executable markup: blocked elements, `on*` event handlers and
/// `javascript:`/`vbscript:` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSanitizer;

impl Sanitizer for HtmlSanitizer {
    fn sanitize(&self, html: &str) -> String {
        let mut fragment = Fragment::parse(html);
        fragment.nodes = clean_nodes(fragment.nodes);
        fragment.to_html()
    }
}

fn clean_nodes(nodes: Vec<Node>) -> Vec<Node> {
    nodes
        .into_iter()
        .filter_map(|node| match node {
            Node::Text(_) => Some(node),
            Node::Element(element) if BLOCKED_ELEMENTS.contains(&element.tag.as_str()) => None,
            Node::Element(element) => Some(Node::Element(clean_element(element))),
        })
        .collect()
}

fn clean_element(element: Element) -> Element {
    let attrs = element
        .attrs
        .into_iter()
        .filter(|(name, value)| {
            let name = name.to_ascii_lowercase();
            if name.starts_with("on") {
                return false;
            }
            !(URL_ATTRIBUTES.contains(&name.as_str()) && is_script_url(value))
        })
        .collect();

    Element {
        tag: element.tag,
        attrs,
        children: clean_nodes(element.children),
    }
}

fn is_script_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.starts_with("javascript:") || compact.starts_with("vbscript:")
}
