//! The `[toc]` placeholder syntax.

/// The literal marker token.
pub const MARKER: &str = "[toc]";

/// The marker as it appears after a markdown pass that escaped its brackets.
pub const ESCAPED_MARKER: &str = "\\[toc\\]";

/// Whether the textual content of a paragraph is exactly a marker.
///
/// Surrounding whitespace is ignored; anything else next to the marker disqualifies it.
#[must_use]
pub fn is_marker(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed == MARKER || trimmed == ESCAPED_MARKER
}
