//! Header records collected from rendered posts.

use serde::{Deserialize, Serialize};

use crate::Error;

/// A `HeadingLevel` is the depth of a heading element: 1 for `<h1>` through 6 for `<h6>`.
pub type HeadingLevel = u8;

/// The deepest heading level a record can carry.
pub const MAX_HEADING_LEVEL: HeadingLevel = 6;

/// A single header found in a thread.
///
/// Records of one build are ordered by post number, then by position within the post.
/// The `id` is unique within the set of records produced by one build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct HeaderRecord {
    /// Heading level, always within `1..=MAX_HEADING_LEVEL`.
    pub level: HeadingLevel,
    /// Trimmed plain text of the heading. Never empty.
    pub text: String,
    /// Thread-wide unique slug used as the element id and link fragment.
    pub id: String,
    /// Number of the post the heading appears in (1-based).
    pub post_number: u32,
    /// Zero-based ordinal of this heading among the qualifying headings of its post.
    ///
    /// Together with `post_number` this is the structural key used to put `id` back onto
    /// the rendered heading element.
    pub position: usize,
    /// Sanitized inner markup of the heading, when the source provided any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl HeaderRecord {
    /// Create a new record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevel`] when `level` is outside `1..=6` and
    /// [`Error::InvalidPostNumber`] when `post_number` is zero.
    pub fn new(
        level: HeadingLevel,
        text: impl Into<String>,
        id: impl Into<String>,
        post_number: u32,
        position: usize,
    ) -> Result<Self, Error> {
        if !(1..=MAX_HEADING_LEVEL).contains(&level) {
            return Err(Error::InvalidLevel(level));
        }
        if post_number == 0 {
            return Err(Error::InvalidPostNumber(post_number));
        }
        Ok(Self {
            level,
            text: text.into(),
            id: id.into(),
            post_number,
            position,
            html: None,
        })
    }

    /// Attach the sanitized inner markup of the heading.
    #[must_use]
    pub fn with_html(mut self, html: Option<String>) -> Self {
        self.html = html;
        self
    }

    /// Whether this header lives in the first post of its thread.
    #[must_use]
    pub fn in_first_post(&self) -> bool {
        self.post_number == 1
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rejects_out_of_range_levels() {
        assert!(matches!(
            HeaderRecord::new(0, "Zero", "zero", 1, 0),
            Err(Error::InvalidLevel(0))
        ));
        assert!(matches!(
            HeaderRecord::new(7, "Seven", "seven", 1, 0),
            Err(Error::InvalidLevel(7))
        ));
        assert!(matches!(
            HeaderRecord::new(2, "Post zero", "post-zero", 0, 0),
            Err(Error::InvalidPostNumber(0))
        ));
    }

    #[test]
    fn serializes_without_empty_markup() -> Result<(), Box<dyn std::error::Error>> {
        let record = HeaderRecord::new(2, "Intro", "intro", 3, 1)?;
        let json = serde_json::to_string(&record)?;
        assert_eq!(
            json,
            r#"{"level":2,"text":"Intro","id":"intro","post_number":3,"position":1}"#
        );

        let back: HeaderRecord = serde_json::from_str(&json)?;
        assert_eq!(back, record);
        assert!(!back.in_first_post());
        Ok(())
    }

    #[test]
    fn serializes_markup_when_present() -> Result<(), Box<dyn std::error::Error>> {
        let record = HeaderRecord::new(1, "Hi", "hi", 1, 0)?.with_html(Some("<em>Hi</em>".into()));
        let value = serde_json::to_value(&record)?;
        assert_eq!(value["html"], "<em>Hi</em>");
        Ok(())
    }
}
