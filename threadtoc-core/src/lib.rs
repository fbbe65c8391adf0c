//! Core data structures and algorithms for thread-wide tables of contents.
//!
//! This crate is shared by every `threadtoc` front end (HTML, Markdown, DOM):
//!
//! - [`HeaderRecord`] - one header found in a thread, with its thread-wide id
//! - [`SlugAllocator`] - unique, URL-safe ids scoped to one build
//! - [`tree`] - the single-pass builder turning leveled headers into nested structure
//! - [`Settings`] - site configuration
//! - [`marker`] - the `[toc]` placeholder syntax
//! - [`Thread`] / [`Post`] - the host's view of a discussion
//!
//! Everything here is created fresh per build and thrown away afterwards; nothing is
//! cached or shared between builds.
//!
//! # Example
//!
//! ```
//! use threadtoc_core::{HeaderRecord, SlugAllocator, tree};
//!
//! let mut slugs = SlugAllocator::new();
//! let headers = vec![
//!     HeaderRecord::new(1, "Intro", slugs.allocate("Intro"), 1, 0)?,
//!     HeaderRecord::new(2, "Intro", slugs.allocate("Intro"), 1, 1)?,
//! ];
//! assert_eq!(headers[1].id, "intro-1");
//!
//! let forest = tree::build_tree(&headers)?;
//! assert_eq!(forest[0].children.len(), 1);
//! # Ok::<(), threadtoc_core::Error>(())
//! ```

mod error;
mod header;
pub mod marker;
mod settings;
mod slug;
mod thread;
pub mod tree;

pub use error::Error;
pub use header::{HeaderRecord, HeadingLevel, MAX_HEADING_LEVEL};
pub use settings::{
    DEFAULT_CLASS_PREFIX, DEFAULT_RETRY_DELAY_MS, DEFAULT_TITLE, EmptyPolicy, MarkerPolicy,
    Settings, SettingsBuilder,
};
pub use slug::{FALLBACK_SLUG, SlugAllocator, base_slug};
pub use thread::{Post, Thread, ThreadPath};
pub use tree::{MIN_HEADERS, TocNode, TocSink};
