//! Slug allocation for header ids.
//!
//! Slugs are derived from header text and made unique against a reservation set that lives
//! for exactly one build. The first occurrence of a text keeps the bare slug, later
//! duplicates get `-1`, `-2`, ... so allocation must happen in document order.

use rustc_hash::FxHashSet;

/// Slug used when nothing of the header text survives sanitizing.
pub const FALLBACK_SLUG: &str = "heading";

/// Allocates unique, URL-safe slugs for one table of contents build.
#[derive(Debug, Default, Clone)]
pub struct SlugAllocator {
    reserved: FxHashSet<String>,
}

impl SlugAllocator {
    /// Create an allocator with an empty reservation set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a unique slug for `text` and reserve it.
    pub fn allocate(&mut self, text: &str) -> String {
        let base = base_slug(text);
        let mut slug = base.clone();
        let mut counter = 1usize;
        while self.reserved.contains(&slug) {
            slug = format!("{base}-{counter}");
            counter += 1;
        }
        tracing::trace!(%text, %slug, "allocated slug");
        self.reserved.insert(slug.clone());
        slug
    }

    /// Whether `slug` has already been handed out by this allocator.
    #[must_use]
    pub fn is_reserved(&self, slug: &str) -> bool {
        self.reserved.contains(slug)
    }

    /// Number of slugs reserved so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    /// Whether nothing has been reserved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }
}

/// Turn header text into its base slug, without any uniqueness suffix.
///
/// Lowercases the text, drops everything that is not a word character (ASCII letters,
/// digits, underscore), whitespace or a hyphen, turns each whitespace run into a single
/// hyphen and trims hyphens from both ends. Hyphen runs already in the text are kept.
#[must_use]
pub fn base_slug(text: &str) -> String {
    let lowered = text.to_lowercase();

    // The bool tracks whether the previous kept char was whitespace
    let (slug, _) = lowered
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .fold(
            (String::with_capacity(lowered.len()), false),
            |(mut acc, in_whitespace), c| {
                if c.is_whitespace() {
                    if !in_whitespace {
                        acc.push('-');
                    }
                    (acc, true)
                } else {
                    acc.push(c);
                    (acc, false)
                }
            },
        );

    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}
