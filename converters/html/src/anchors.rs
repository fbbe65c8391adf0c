//! Removing link wrappers from pre-sanitized header markup.
//!
//! A TOC entry is itself a link, so anchors inside header markup cannot be kept. Empty
//! anchors (the `name` placeholders hosts put in front of headings) disappear; anchors with
//! content are replaced by their plain text. Every other element is kept as is.

use scraper::{ElementRef, Html, Node};

use crate::escape::{VOID_ELEMENTS, escape_attr, escape_text};

/// Strip anchor tags from `markup`, keeping their text and all surrounding inline markup.
///
/// Unwrapped link text stays a separate word: when both the output so far and the link
/// text have an alphanumeric character at the seam, a space goes between them.
#[must_use]
pub fn strip_anchors(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let mut out = String::with_capacity(markup.len());
    write_children(fragment.root_element(), &mut out);
    out.trim().to_string()
}

fn write_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Element(inner) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                if inner.name() == "a" {
                    write_anchor_text(child_element, out);
                } else {
                    write_element(child_element, out);
                }
            }
            Node::Document
            | Node::Fragment
            | Node::Doctype(_)
            | Node::Comment(_)
            | Node::ProcessingInstruction(_) => {}
        }
    }
}

fn write_anchor_text(anchor: ElementRef<'_>, out: &mut String) {
    let text = anchor.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    let joins_word = out.chars().last().is_some_and(char::is_alphanumeric)
        && text.chars().next().is_some_and(char::is_alphanumeric);
    if joins_word {
        out.push(' ');
    }
    out.push_str(&escape_text(text));
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let value = element.value();
    let name = value.name();
    out.push('<');
    out.push_str(name);
    for (attr, attr_value) in value.attrs() {
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        out.push_str(&escape_attr(attr_value));
        out.push('"');
    }
    out.push('>');
    if VOID_ELEMENTS.contains(&name) {
        return;
    }
    write_children(element, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::placeholder_and_link(
        "<a name=\"x\"></a>Title<a href=\"/y\">link</a>",
        "Title link"
    )]
    #[case::host_anchor("<a name=\"intro\" href=\"#intro\"></a>Intro", "Intro")]
    #[case::inline_markup_kept(
        "<img alt=\":smile:\"> <strong>Bold</strong> <a href=\"/y\">read</a>",
        "<img alt=\":smile:\"> <strong>Bold</strong> read"
    )]
    #[case::formatting_inside_link_dropped(
        "See <a href=\"/y\"><em>this</em> page</a>",
        "See this page"
    )]
    #[case::punctuation_seam("Docs (<a href=\"/d\">v2</a>)", "Docs (v2)")]
    #[case::no_anchors("Plain &amp; simple", "Plain &amp; simple")]
    #[case::nested_formatting_around_link(
        "<em>Part <a href=\"/p\">one</a></em>",
        "<em>Part one</em>"
    )]
    fn strips_anchor_wrappers(#[case] markup: &str, #[case] expected: &str) {
        assert_eq!(strip_anchors(markup), expected);
    }

    #[test]
    fn text_is_reescaped() {
        assert_eq!(strip_anchors("<a href=\"/\">a &lt; b</a>"), "a &lt; b");
        assert_eq!(strip_anchors("1 &lt; 2"), "1 &lt; 2");
    }
}
