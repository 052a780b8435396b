//! Query-term highlighting inside rendered articles.

use crate::dom::{Element, Fragment, Node};
use crate::text::{find_chars, fold_chars};

/// Subtrees whose text is never highlighted.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "code", "pre", "mark"];

/// Wrap every case-insensitive occurrence of each term in a `<mark>` element.
///
/// Terms are applied one after another, each pass walking the tree as left by
/// the previous one. Text below any element in [`SKIPPED_ELEMENTS`] is left
/// alone, which includes marks inserted by earlier passes. Returns the number
/// of marks inserted.
///
/// Running this twice on the same fragment nests marks; highlight a fresh
/// parse of the article each time.
pub fn highlight_terms(fragment: &mut Fragment, terms: &[String]) -> usize {
    terms
        .iter()
        .filter(|term| !term.is_empty())
        .map(|term| mark_nodes(&mut fragment.nodes, &fold_chars(term)))
        .sum()
}

fn mark_nodes(nodes: &mut Vec<Node>, needle: &[char]) -> usize {
    let mut count = 0;
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes.drain(..) {
        match node {
            Node::Text(text) => count += split_text(&text, needle, &mut out),
            Node::Element(mut element) => {
                if !SKIPPED_ELEMENTS.contains(&element.tag.as_str()) {
                    count += mark_nodes(&mut element.children, needle);
                }
                out.push(Node::Element(element));
            }
        }
    }

    *nodes = out;
    count
}

/// Push `text` to `out` as alternating text and mark nodes.
fn split_text(text: &str, needle: &[char], out: &mut Vec<Node>) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let folded = fold_chars(text);
    let mut count = 0;
    let mut cursor = 0;

    while let Some(index) = find_chars(&folded, needle, cursor) {
        if index > cursor {
            out.push(Node::Text(chars[cursor..index].iter().collect()));
        }
        let end = index + needle.len();
        let matched: String = chars[index..end].iter().collect();
        out.push(Node::Element(Element::new("mark").with_text(matched)));
        count += 1;
        cursor = end;
    }

    if count == 0 {
        out.push(Node::Text(text.to_string()));
    } else if cursor < chars.len() {
        out.push(Node::Text(chars[cursor..].iter().collect()));
    }
    count
}
