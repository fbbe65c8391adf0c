//! A headless document on an arena tree.

use ego_tree::{NodeId, NodeRef, Tree, iter::Edge};
use scraper::{ElementRef, Html, Node, node::Element};
use threadtoc_converters_html::{
    escape::{RAW_TEXT_ELEMENTS, VOID_ELEMENTS, escape_attr, escape_text},
    extract::heading_level,
};
use threadtoc_core::HeadingLevel;

use crate::{Document, Dom, Error};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomNode {
    Root,
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

impl DomNode {
    fn element_name(&self) -> Option<&str> {
        if let Self::Element { name, .. } = self {
            Some(name.as_str())
        } else {
            None
        }
    }

    fn attribute(&self, wanted: &str) -> Option<&str> {
        if let Self::Element { attrs, .. } = self {
            attrs
                .iter()
                .find(|(name, _)| name == wanted)
                .map(|(_, value)| value.as_str())
        } else {
            None
        }
    }
}

/// An HTML fragment held in memory.
///
/// Parsed with `scraper`, mutated through [`Dom`], and written back out with
/// [`MemoryDom::to_html`]. Scroll requests are recorded instead of performed.
#[derive(Clone, Debug)]
pub struct MemoryDom {
    tree: Tree<DomNode>,
    scrolled: Vec<NodeId>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self {
            tree: Tree::new(DomNode::Root),
            scrolled: Vec::new(),
        }
    }
}

impl MemoryDom {
    /// Parse an HTML fragment. Malformed markup is repaired the way a browser would.
    #[must_use]
    pub fn parse(markup: &str) -> Self {
        let mut dom = Self::default();
        let fragment = Html::parse_fragment(markup);
        let root = dom.tree.root().id();
        graft(&mut dom.tree, root, fragment.root_element());
        dom
    }

    /// Serialize the document back to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for edge in self.tree.root().traverse() {
            match edge {
                Edge::Open(node) => write_open(node, &mut out),
                Edge::Close(node) => {
                    if let Some(name) = node.value().element_name()
                        && !VOID_ELEMENTS.contains(&name)
                    {
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                }
            }
        }
        out
    }

    /// Nodes passed to [`Dom::scroll_into_view`], oldest first.
    #[must_use]
    pub fn scrolled(&self) -> &[NodeId] {
        &self.scrolled
    }

    fn elements_under(&self, scope: NodeId) -> impl Iterator<Item = NodeRef<'_, DomNode>> {
        self.tree
            .get(scope)
            .into_iter()
            .flat_map(|node| node.descendants())
            .filter(|node| node.value().element_name().is_some())
    }

    fn update_attrs(&mut self, node: NodeId, update: impl FnOnce(&mut Vec<(String, String)>)) {
        if let Some(mut node) = self.tree.get_mut(node)
            && let DomNode::Element { attrs, .. } = node.value()
        {
            update(attrs);
        }
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    fn headings(&self, scope: NodeId, max_level: HeadingLevel) -> Vec<(NodeId, HeadingLevel)> {
        self.elements_under(scope)
            .filter_map(|node| {
                let level = node.value().element_name().and_then(heading_level)?;
                (level <= max_level).then_some((node.id(), level))
            })
            .collect()
    }

    fn paragraphs(&self, scope: NodeId) -> Vec<NodeId> {
        self.elements_under(scope)
            .filter(|node| node.value().element_name() == Some("p"))
            .map(|node| node.id())
            .collect()
    }

    fn elements_with_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.elements_under(scope)
            .filter(|node| {
                node.value()
                    .attribute("class")
                    .is_some_and(|value| value.split_whitespace().any(|c| c == class))
            })
            .map(|node| node.id())
            .collect()
    }

    fn text_content(&self, node: NodeId) -> String {
        self.tree
            .get(node)
            .into_iter()
            .flat_map(|node| node.descendants())
            .filter_map(|node| {
                if let DomNode::Text(text) = node.value() {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree
            .get(node)?
            .value()
            .attribute(name)
            .map(ToString::to_string)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.update_attrs(node, |attrs| {
            if let Some((_, existing)) = attrs.iter_mut().find(|(attr, _)| attr == name) {
                value.clone_into(existing);
            } else {
                attrs.push((name.to_string(), value.to_string()));
            }
        });
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        self.update_attrs(node, |attrs| attrs.retain(|(attr, _)| attr != name));
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements_under(self.root())
            .find(|node| node.value().attribute("id") == Some(id))
            .map(|node| node.id())
    }

    fn replace_with_markup(&mut self, node: NodeId, markup: &str) -> Result<Vec<NodeId>, Error> {
        if self.tree.get(node).and_then(|n| n.parent()).is_none() {
            return Err(Error::DetachedNode);
        }
        let replacement = Self::parse(markup);
        let mut inserted = Vec::new();
        for child in replacement.tree.root().children() {
            let mut target = self.tree.get_mut(node).ok_or(Error::DetachedNode)?;
            let id = target.insert_before(child.value().clone()).id();
            copy_children(&mut self.tree, id, child);
            if child.value().element_name().is_some() {
                inserted.push(id);
            }
        }
        if let Some(mut target) = self.tree.get_mut(node) {
            target.detach();
        }
        Ok(inserted)
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        tracing::trace!(?node, "scrolling into view");
        self.scrolled.push(node);
    }
}

impl Document for MemoryDom {
    fn parse(markup: &str) -> Self {
        MemoryDom::parse(markup)
    }

    fn to_html(&self) -> String {
        MemoryDom::to_html(self)
    }
}

fn graft(tree: &mut Tree<DomNode>, parent: NodeId, element: ElementRef<'_>) {
    for child in element.children() {
        let value = match child.value() {
            Node::Text(text) => DomNode::Text((**text).to_owned()),
            Node::Comment(comment) => DomNode::Comment((**comment).to_owned()),
            Node::Element(inner) => DomNode::Element {
                name: inner.name().to_string(),
                attrs: qualified_attrs(inner),
            },
            Node::Document | Node::Fragment | Node::Doctype(_) | Node::ProcessingInstruction(_) => {
                continue;
            }
        };
        let Some(mut parent_node) = tree.get_mut(parent) else {
            return;
        };
        let id = parent_node.append(value).id();
        if let Some(inner) = ElementRef::wrap(child) {
            graft(tree, id, inner);
        }
    }
}

/// Attribute names as written in the source, `xlink:href` included.
fn qualified_attrs(element: &Element) -> Vec<(String, String)> {
    element
        .attrs
        .iter()
        .map(|(name, value)| {
            let name = match &name.prefix {
                Some(prefix) => format!("{prefix}:{}", name.local),
                None => name.local.to_string(),
            };
            (name, value.to_string())
        })
        .collect()
}

fn copy_children(tree: &mut Tree<DomNode>, parent: NodeId, source: NodeRef<'_, DomNode>) {
    for child in source.children() {
        let Some(mut parent_node) = tree.get_mut(parent) else {
            return;
        };
        let id = parent_node.append(child.value().clone()).id();
        copy_children(tree, id, child);
    }
}

fn write_open(node: NodeRef<'_, DomNode>, out: &mut String) {
    match node.value() {
        DomNode::Root => {}
        DomNode::Element { name, attrs } => {
            out.push('<');
            out.push_str(name);
            for (attr, value) in attrs {
                out.push(' ');
                out.push_str(attr);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            out.push('>');
        }
        DomNode::Text(text) => {
            let raw = node
                .parent()
                .and_then(|parent| parent.value().element_name())
                .is_some_and(|name| RAW_TEXT_ELEMENTS.contains(&name));
            if raw {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        DomNode::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
    }
}
