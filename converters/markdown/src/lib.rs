//! Table of contents pass for a single Markdown document.
//!
//! This is the inline variant of the thread converter: instead of post-processing
//! rendered HTML it rewrites a [`pulldown_cmark`] event stream before rendering.
//! Heading ids are written straight onto the heading events, and a paragraph that
//! holds nothing but the `[toc]` marker is swapped for the rendered table.
//!
//! # Example
//!
//! ```
//! use threadtoc_converters_markdown::render_markdown;
//! use threadtoc_core::Settings;
//!
//! let html = render_markdown("[toc]\n\n# One\n\n## Two\n", &Settings::default())?;
//! assert!(html.contains(r##"<a href="#one""##));
//! assert!(html.contains(r#"<h2 id="two">"#));
//! # Ok::<(), threadtoc_converters_markdown::Error>(())
//! ```
//!
//! Links always point into the same document; there is no post indicator and no
//! cross-post navigation here.

use pulldown_cmark::{Event, Options, Parser, html};
use threadtoc_core::{HeaderRecord, Settings};

mod error;
mod pass;

pub use error::Error;
pub use pass::Processed;

/// Markdown table of contents processor.
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

    /// Run the pass over an existing event stream.
    ///
    /// When the processor is disabled the events are passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if a heading cannot be turned into a header record.
    pub fn process<'a, I>(&self, events: I) -> Result<Processed<'a>, Error>
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        if !self.settings.enabled {
            return Ok(Processed {
                events: events.into_iter().collect(),
                headers: Vec::new(),
            });
        }
        pass::run(events, &self.settings)
    }

    /// Parse `source`, run the pass and render the result to HTML.
    ///
    /// # Errors
    ///
    /// Returns an error if the pass fails.
    pub fn render(&self, source: &str) -> Result<String, Error> {
        let processed = self.process(Parser::new_ext(source, Options::empty()))?;
        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, processed.events.into_iter());
        Ok(out)
    }

    /// Headers the pass would link to, without rendering.
    ///
    /// # Errors
    ///
    /// Returns an error if a heading cannot be turned into a header record.
    pub fn headers(&self, source: &str) -> Result<Vec<HeaderRecord>, Error> {
        Ok(self.process(Parser::new(source))?.headers)
    }
}

/// Render `source` to HTML with heading ids and the table of contents in place.
///
/// # Errors
///
/// Returns an error if the pass fails.
pub fn render_markdown(source: &str, settings: &Settings) -> Result<String, Error> {
    Processor::new(settings.clone()).render(source)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use threadtoc_core::EmptyPolicy;

    use super::*;

    #[test]
    fn disabled_processor_passes_through() -> Result<(), Error> {
        let processor = Processor::new(Settings::builder().enabled(false).build());
        let html = processor.render("[toc]\n\n# One\n\n# Two\n")?;
        assert_eq!(html, "<p>[toc]</p>\n<h1>One</h1>\n<h1>Two</h1>\n");
        Ok(())
    }

    #[test]
    fn placeholder_replaces_marker_when_gate_fails() -> Result<(), Error> {
        let settings = Settings::builder()
            .empty_policy(EmptyPolicy::Placeholder)
            .build();
        let html = render_markdown("[toc]\n\n# Only\n", &settings)?;
        assert!(html.contains("No headers found"));
        assert!(!html.contains("<p>[toc]</p>"));
        Ok(())
    }

    #[test]
    fn headers_follow_document_order() -> Result<(), Error> {
        let processor = Processor::default();
        let headers = processor.headers("## B\n\n# A\n\n## B\n")?;
        let ids: Vec<_> = headers.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "b-1"]);
        assert!(headers.iter().all(|h| h.post_number == 1));
        Ok(())
    }
}
