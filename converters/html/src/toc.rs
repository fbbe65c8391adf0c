use std::fmt::Write;

use threadtoc_core::{EmptyPolicy, HeaderRecord, MIN_HEADERS, Settings, ThreadPath, TocSink, tree};

use crate::{
    Error,
    anchors::strip_anchors,
    escape::{escape_attr, escape_text},
};

/// Text of the placeholder rendered by [`EmptyPolicy::Placeholder`].
pub const EMPTY_MESSAGE: &str = "No headers found";

/// Where TOC links point to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkStyle {
    /// Thread-wide links: first-post headers link to the thread, others to their post.
    ///
    /// Without a thread path every link falls back to a same-page `#id` fragment.
    Thread(Option<ThreadPath>),
    /// Same-document `#id` fragments.
    Document,
}

/// Renders header records into table of contents markup.
#[derive(Clone, Debug)]
pub struct TocRenderer<'a> {
    settings: &'a Settings,
    links: LinkStyle,
}

impl<'a> TocRenderer<'a> {
    #[must_use]
    pub fn for_thread(settings: &'a Settings, path: Option<ThreadPath>) -> Self {
        Self {
            settings,
            links: LinkStyle::Thread(path),
        }
    }

    #[must_use]
    pub fn for_document(settings: &'a Settings) -> Self {
        Self {
            settings,
            links: LinkStyle::Document,
        }
    }

    /// The navigation target for `header`.
    #[must_use]
    pub fn href(&self, header: &HeaderRecord) -> String {
        match &self.links {
            LinkStyle::Thread(Some(path)) => path.header_href(header.post_number, &header.id),
            LinkStyle::Thread(None) | LinkStyle::Document => format!("#{}", header.id),
        }
    }

    /// Render the table of contents for `headers`.
    ///
    /// Below [`MIN_HEADERS`] headers this returns `None`, or the empty-state placeholder
    /// when the settings ask for one.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the markup fails.
    pub fn render(&self, headers: &[HeaderRecord]) -> Result<Option<String>, Error> {
        if headers.len() < MIN_HEADERS {
            return match self.settings.empty_policy {
                EmptyPolicy::Omit => Ok(None),
                EmptyPolicy::Placeholder => self.render_placeholder().map(Some),
            };
        }

        let settings = self.settings;
        let mut sink = HtmlSink {
            renderer: self,
            out: String::new(),
        };
        writeln!(sink.out, "<div class=\"{}\">", escape_attr(&settings.class("")))?;
        self.render_title(&mut sink.out)?;
        write!(sink.out, "<ul class=\"{}\">", escape_attr(&settings.class("list")))?;
        tree::build(headers, &mut sink)?;
        writeln!(sink.out, "</ul>")?;
        writeln!(sink.out, "</div>")?;
        tracing::debug!(headers = headers.len(), "rendered table of contents");
        Ok(Some(sink.out))
    }

    fn render_placeholder(&self) -> Result<String, Error> {
        let mut out = String::new();
        writeln!(
            out,
            "<div class=\"{} {}\">",
            escape_attr(&self.settings.class("")),
            escape_attr(&self.settings.class("empty"))
        )?;
        self.render_title(&mut out)?;
        writeln!(
            out,
            "<p class=\"{}\">{EMPTY_MESSAGE}</p>",
            escape_attr(&self.settings.class("empty-message"))
        )?;
        writeln!(out, "</div>")?;
        Ok(out)
    }

    fn render_title(&self, out: &mut String) -> Result<(), Error> {
        writeln!(
            out,
            "<div class=\"{}\">{}</div>",
            escape_attr(&self.settings.class("title")),
            escape_text(&self.settings.title)
        )?;
        Ok(())
    }

    fn render_entry(&self, header: &HeaderRecord, out: &mut String) -> Result<(), Error> {
        write!(
            out,
            "<a href=\"{}\" class=\"{}\" data-post-number=\"{}\" data-header-id=\"{}\">",
            escape_attr(&self.href(header)),
            escape_attr(&self.settings.class("link")),
            header.post_number,
            escape_attr(&header.id),
        )?;
        let content = header
            .html
            .as_deref()
            .map(strip_anchors)
            .filter(|markup| !markup.is_empty())
            .unwrap_or_else(|| escape_text(&header.text));
        out.push_str(&content);
        if header.post_number > 1 && matches!(self.links, LinkStyle::Thread(_)) {
            write!(
                out,
                " <span class=\"{}\">(Post #{})</span>",
                escape_attr(&self.settings.class("post")),
                header.post_number
            )?;
        }
        out.push_str("</a>");
        Ok(())
    }
}

struct HtmlSink<'r, 'a> {
    renderer: &'r TocRenderer<'a>,
    out: String,
}

impl TocSink for HtmlSink<'_, '_> {
    type Error = Error;

    fn open_layer(&mut self) -> Result<(), Error> {
        self.out.push_str("<ul>");
        Ok(())
    }

    fn close_layer(&mut self) -> Result<(), Error> {
        self.out.push_str("</ul>");
        Ok(())
    }

    fn open_item(&mut self, header: Option<&HeaderRecord>) -> Result<(), Error> {
        self.out.push_str("<li>");
        if let Some(header) = header {
            self.renderer.render_entry(header, &mut self.out)?;
        }
        Ok(())
    }

    fn close_item(&mut self) -> Result<(), Error> {
        self.out.push_str("</li>");
        Ok(())
    }
}
