//! HTML front end for thread tables of contents.
//!
//! Works on host-rendered post HTML:
//!
//! - [`extract`](extract::extract) - headings of one post, in document order
//! - [`collect_thread_headers`] - headers of a whole thread with thread-wide unique ids
//! - [`TocRenderer`] - nested list markup with same-post and cross-post links
//! - [`strip_anchors`] - unwraps links inside pre-sanitized header markup
//!
//! # Example
//!
//! ```
//! use threadtoc_converters_html::Processor;
//! use threadtoc_core::{Post, Settings, Thread};
//!
//! let thread = Thread {
//!     url: Some("/t/welcome/42".into()),
//!     posts: vec![
//!         Post::new(1, "<p>[toc]</p><h1>Intro</h1>"),
//!         Post::new(2, "<h2>Intro</h2>"),
//!     ],
//! };
//! let processor = Processor::new(Settings::default());
//! let headers = processor.headers(&thread);
//! assert_eq!(headers[1].id, "intro-1");
//!
//! let toc = processor.toc(&thread, &headers)?.unwrap_or_default();
//! assert!(toc.contains("href=\"/t/welcome/42/2#intro-1\""));
//! # Ok::<(), threadtoc_converters_html::Error>(())
//! ```

use threadtoc_core::{HeaderRecord, Settings, Thread};

mod anchors;
mod collect;
mod error;
pub mod escape;
pub mod extract;
mod toc;

pub use anchors::strip_anchors;
pub use collect::{collect_headers, collect_thread_headers, topic_headers};
pub use error::Error;
pub use toc::{EMPTY_MESSAGE, LinkStyle, TocRenderer};

/// Runs the server side of the pipeline for one thread at a time.
#[derive(Clone, Debug, Default)]
pub struct Processor {
    settings: Settings,
}

impl Processor {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Thread-wide header records, or nothing when the feature is disabled.
    #[must_use]
    pub fn headers(&self, thread: &Thread) -> Vec<HeaderRecord> {
        if !self.settings.enabled {
            return Vec::new();
        }
        collect_thread_headers(thread, &self.settings)
    }

    /// Render the thread's table of contents from previously collected `headers`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the markup fails.
    pub fn toc(&self, thread: &Thread, headers: &[HeaderRecord]) -> Result<Option<String>, Error> {
        TocRenderer::for_thread(&self.settings, thread.path()).render(headers)
    }
}
