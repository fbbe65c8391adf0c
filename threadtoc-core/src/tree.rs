//! Single-pass conversion of a flat, leveled header list into nested structure.
//!
//! [`build`] walks the headers once, keeping only the current level, and emits open/close
//! events into a [`TocSink`]. Sinks decide what the structure becomes: the HTML renderer
//! writes markup, [`build_tree`] collects [`TocNode`]s.
//!
//! The outermost list is owned by the caller: sinks are expected to open it before calling
//! [`build`] and close it afterwards. Inside it, every list opened by the builder is
//! wrapped in an item, so a skipped level (e.g. level 1 followed by level 4) produces
//! empty intermediate items rather than an error.

use std::cmp::Ordering;

use crate::{Error, HeaderRecord, MAX_HEADING_LEVEL};

/// Fewer headers than this produce no table of contents at all.
pub const MIN_HEADERS: usize = 2;

/// Receives the structural events produced by [`build`].
///
/// A "layer" is a nested list; an "item" is one entry of a list. Every event the builder
/// emits is balanced: each `open_*` is matched by exactly one `close_*` of the same kind.
pub trait TocSink {
    /// The error type that can be returned while receiving events.
    type Error;

    /// Open a nested list inside the currently open item.
    ///
    /// # Errors
    ///
    /// Implementation defined.
    fn open_layer(&mut self) -> Result<(), Self::Error>;

    /// Close the innermost open list.
    ///
    /// # Errors
    ///
    /// Implementation defined.
    fn close_layer(&mut self) -> Result<(), Self::Error>;

    /// Open an item in the innermost open list.
    ///
    /// `header` is `None` for the empty items synthesized when levels are skipped.
    ///
    /// # Errors
    ///
    /// Implementation defined.
    fn open_item(&mut self, header: Option<&HeaderRecord>) -> Result<(), Self::Error>;

    /// Close the innermost open item.
    ///
    /// # Errors
    ///
    /// Implementation defined.
    fn close_item(&mut self) -> Result<(), Self::Error>;
}

/// Emit the nested structure of `headers` into `sink`.
///
/// Returns `Ok(false)` without emitting anything when there are fewer than
/// [`MIN_HEADERS`] headers. Levels outside `1..=6` are clamped into range.
///
/// # Errors
///
/// Propagates any error returned by the sink.
pub fn build<S: TocSink>(headers: &[HeaderRecord], sink: &mut S) -> Result<bool, S::Error> {
    if headers.len() < MIN_HEADERS {
        tracing::debug!(headers = headers.len(), "not enough headers for a table of contents");
        return Ok(false);
    }

    let mut current_level: u8 = 0;
    for header in headers {
        let level = header.level.clamp(1, MAX_HEADING_LEVEL);
        match level.cmp(&current_level) {
            Ordering::Greater => {
                // Going down from the top: the caller's list is the first layer.
                let intermediate = if current_level == 0 {
                    level - 1
                } else {
                    sink.open_layer()?;
                    level - current_level - 1
                };
                for _ in 0..intermediate {
                    sink.open_item(None)?;
                    sink.open_layer()?;
                }
            }
            Ordering::Less => {
                sink.close_item()?;
                for _ in level..current_level {
                    sink.close_layer()?;
                    sink.close_item()?;
                }
            }
            Ordering::Equal => sink.close_item()?,
        }
        sink.open_item(Some(header))?;
        current_level = level;
    }

    sink.close_item()?;
    for _ in 1..current_level {
        sink.close_layer()?;
        sink.close_item()?;
    }
    Ok(true)
}

/// One entry of a nested table of contents.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TocNode {
    /// The header this entry links to, `None` for a synthesized intermediate entry.
    pub header: Option<HeaderRecord>,
    /// Entries nested one level deeper.
    pub children: Vec<TocNode>,
}

impl TocNode {
    /// Number of real (non-synthesized) headers in this subtree, including this node.
    #[must_use]
    pub fn header_count(&self) -> usize {
        usize::from(self.header.is_some())
            + self.children.iter().map(TocNode::header_count).sum::<usize>()
    }

    /// Depth of the subtree rooted at this node (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TocNode::depth).max().unwrap_or(0)
    }
}

/// Collects builder events into a [`TocNode`] forest.
#[derive(Debug)]
struct TreeSink {
    lists: Vec<Vec<TocNode>>,
    items: Vec<TocNode>,
}

impl TreeSink {
    fn new() -> Self {
        Self {
            lists: vec![Vec::new()],
            items: Vec::new(),
        }
    }

    fn finish(mut self) -> Result<Vec<TocNode>, Error> {
        match (self.lists.pop(), self.lists.is_empty(), self.items.is_empty()) {
            (Some(root), true, true) => Ok(root),
            _ => Err(Error::UnbalancedTree),
        }
    }
}

impl TocSink for TreeSink {
    type Error = Error;

    fn open_layer(&mut self) -> Result<(), Error> {
        self.lists.push(Vec::new());
        Ok(())
    }

    fn close_layer(&mut self) -> Result<(), Error> {
        let list = self.lists.pop().ok_or(Error::UnbalancedTree)?;
        let parent = self.items.last_mut().ok_or(Error::UnbalancedTree)?;
        parent.children = list;
        Ok(())
    }

    fn open_item(&mut self, header: Option<&HeaderRecord>) -> Result<(), Error> {
        self.items.push(TocNode {
            header: header.cloned(),
            children: Vec::new(),
        });
        Ok(())
    }

    fn close_item(&mut self) -> Result<(), Error> {
        let item = self.items.pop().ok_or(Error::UnbalancedTree)?;
        self.lists
            .last_mut()
            .ok_or(Error::UnbalancedTree)?
            .push(item);
        Ok(())
    }
}

/// Build the nested [`TocNode`] forest for `headers`.
///
/// Returns an empty forest when there are fewer than [`MIN_HEADERS`] headers.
///
/// # Errors
///
/// Returns [`Error::UnbalancedTree`] if the builder's events do not nest, which would be a
/// bug in [`build`].
pub fn build_tree(headers: &[HeaderRecord]) -> Result<Vec<TocNode>, Error> {
    let mut sink = TreeSink::new();
    build(headers, &mut sink)?;
    sink.finish()
}
