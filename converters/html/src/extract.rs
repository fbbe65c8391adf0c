//! Header extraction from a rendered post.

use scraper::{ElementRef, Html, Selector};
use threadtoc_core::{HeadingLevel, MAX_HEADING_LEVEL};

use crate::Error;

/// A heading found in one post, before it gets an id and a post number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedHeader {
    pub level: HeadingLevel,
    /// Trimmed text content, never empty.
    pub text: String,
    /// Inner markup of the heading element as rendered by the host.
    pub html: Option<String>,
}

/// Extract headings of level 1 through `max_level` from `rendered`, in document order.
///
/// Headings whose trimmed text is empty are skipped. Empty or malformed content yields an
/// empty list rather than an error.
#[must_use]
pub fn extract(rendered: &str, max_level: HeadingLevel) -> Vec<ExtractedHeader> {
    if rendered.trim().is_empty() {
        return Vec::new();
    }
    let selector = match heading_selector(max_level) {
        Ok(selector) => selector,
        Err(e) => {
            tracing::warn!(error = %e, "skipping header extraction");
            return Vec::new();
        }
    };

    let fragment = Html::parse_fragment(rendered);
    fragment
        .select(&selector)
        .filter_map(|element| {
            let header = extract_one(element);
            if header.is_none() {
                tracing::trace!(tag = element.value().name(), "skipping empty heading");
            }
            header
        })
        .collect()
}

fn extract_one(element: ElementRef<'_>) -> Option<ExtractedHeader> {
    let level = heading_level(element.value().name())?;
    let text = element.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        return None;
    }
    let html = element.inner_html().trim().to_string();
    Some(ExtractedHeader {
        level,
        text,
        html: (!html.is_empty()).then_some(html),
    })
}

/// The level of a heading tag name (`h1` to `h6`), `None` for anything else.
#[must_use]
pub fn heading_level(tag: &str) -> Option<HeadingLevel> {
    tag.strip_prefix('h')
        .or_else(|| tag.strip_prefix('H'))?
        .parse::<HeadingLevel>()
        .ok()
        .filter(|level| (1..=MAX_HEADING_LEVEL).contains(level))
}

/// A selector matching heading elements from `h1` up to `max_level` (clamped into `1..=6`).
///
/// # Errors
///
/// Returns [`Error::InvalidSelector`] if the selector cannot be parsed.
pub fn heading_selector(max_level: HeadingLevel) -> Result<Selector, Error> {
    let list = (1..=max_level.clamp(1, MAX_HEADING_LEVEL))
        .map(|level| format!("h{level}"))
        .collect::<Vec<_>>()
        .join(", ");
    Selector::parse(&list).map_err(|e| Error::InvalidSelector(format!("{list}: {e}")))
}
