//! The document capability the reconciler works through.

use std::fmt::Debug;

use threadtoc_core::HeadingLevel;

use crate::Error;

/// Query, mutate and scroll access to a rendered document.
///
/// Hosts implement this over whatever document they own; [`MemoryDom`](crate::MemoryDom)
/// is the headless implementation used on the server and in tests. Nodes are plain
/// handles, so implementations decide how they map onto their own tree.
pub trait Dom {
    type Node: Copy + Eq + Debug;

    /// The node that contains the whole document.
    fn root(&self) -> Self::Node;

    /// Heading elements from `h1` to `max_level` inside `scope`, in document order.
    fn headings(
        &self,
        scope: Self::Node,
        max_level: HeadingLevel,
    ) -> Vec<(Self::Node, HeadingLevel)>;

    /// Paragraph elements inside `scope`, in document order.
    fn paragraphs(&self, scope: Self::Node) -> Vec<Self::Node>;

    /// Elements inside `scope` (`scope` included) carrying `class`, in document order.
    fn elements_with_class(&self, scope: Self::Node, class: &str) -> Vec<Self::Node>;

    /// Concatenated text of `node` and all its descendants.
    fn text_content(&self, node: Self::Node) -> String;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    fn remove_attribute(&mut self, node: Self::Node, name: &str);

    /// The element whose `id` is exactly `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Replace `node` with the elements parsed from `markup`, returning the new top-level
    /// elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DetachedNode`] if `node` is no longer in the document.
    fn replace_with_markup(
        &mut self,
        node: Self::Node,
        markup: &str,
    ) -> Result<Vec<Self::Node>, Error>;

    /// Smooth-scroll `node` to the top of the viewport.
    fn scroll_into_view(&mut self, node: Self::Node);

    /// The element's non-empty `id`.
    fn id(&self, node: Self::Node) -> Option<String> {
        self.attribute(node, "id").filter(|id| !id.is_empty())
    }

    fn set_id(&mut self, node: Self::Node, id: &str) {
        self.set_attribute(node, "id", id);
    }

    fn has_class(&self, node: Self::Node, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|value| value.split_whitespace().any(|c| c == class))
    }

    fn add_class(&mut self, node: Self::Node, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let value = self
            .attribute(node, "class")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map_or_else(|| class.to_string(), |value| format!("{value} {class}"));
        self.set_attribute(node, "class", &value);
    }

    fn remove_class(&mut self, node: Self::Node, class: &str) {
        let Some(value) = self.attribute(node, "class") else {
            return;
        };
        let kept = value
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(node, "class", &kept);
    }

    fn is_hidden(&self, node: Self::Node) -> bool {
        self.attribute(node, "hidden").is_some()
    }

    /// Hide or show `node` without removing it from the document.
    fn set_hidden(&mut self, node: Self::Node, hidden: bool) {
        if hidden {
            self.set_attribute(node, "hidden", "");
        } else {
            self.remove_attribute(node, "hidden");
        }
    }
}

/// A [`Dom`] that can be built from markup and written back out.
pub trait Document: Dom + Sized {
    fn parse(markup: &str) -> Self;

    fn to_html(&self) -> String;
}
