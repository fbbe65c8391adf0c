use pulldown_cmark::{CowStr, Event, Tag, TagEnd};
use threadtoc_converters_html::TocRenderer;
use threadtoc_core::{HeaderRecord, MarkerPolicy, Settings, SlugAllocator, marker};

use crate::Error;

/// Output of [`run`]: the rewritten event stream and the headers found in it.
#[derive(Debug)]
pub struct Processed<'a> {
    pub events: Vec<Event<'a>>,
    pub headers: Vec<HeaderRecord>,
}

/// A heading whose text is still being collected.
struct OpenHeading {
    start: usize,
    level: u8,
    text: String,
}

/// Give every qualifying heading an id and replace marker paragraphs with the rendered
/// table of contents.
///
/// The pass only sees this one document: ids come from a fresh [`SlugAllocator`] and every
/// link is a same-document fragment. Headings deeper than the configured level and
/// headings without text are left untouched.
///
/// # Errors
///
/// Returns [`Error::Core`] if a header record cannot be built.
pub fn run<'a, I>(events: I, settings: &Settings) -> Result<Processed<'a>, Error>
where
    I: IntoIterator<Item = Event<'a>>,
{
    let (events, headers) = assign_ids(events, settings)?;
    let rendered = TocRenderer::for_document(settings).render(&headers);
    Ok(splice_toc(events, headers, rendered, settings.marker_policy))
}

/// Put a rendered table of contents in place of the markers. Markers stay when there is
/// nothing to show or rendering failed.
fn splice_toc<'a>(
    events: Vec<Event<'a>>,
    headers: Vec<HeaderRecord>,
    rendered: Result<Option<String>, threadtoc_converters_html::Error>,
    policy: MarkerPolicy,
) -> Processed<'a> {
    let toc = match rendered {
        Ok(Some(toc)) => toc,
        Ok(None) => {
            tracing::debug!(headers = headers.len(), "no table of contents for document");
            return Processed { events, headers };
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to render table of contents, leaving markers");
            return Processed { events, headers };
        }
    };
    let events = replace_markers(events, &toc, policy);
    Processed { events, headers }
}

fn assign_ids<'a, I>(
    events: I,
    settings: &Settings,
) -> Result<(Vec<Event<'a>>, Vec<HeaderRecord>), Error>
where
    I: IntoIterator<Item = Event<'a>>,
{
    let max_level = settings.effective_max_level();
    let mut slugs = SlugAllocator::new();
    let mut headers = Vec::new();
    let mut out: Vec<Event<'a>> = Vec::new();
    let mut open: Option<OpenHeading> = None;

    for event in events {
        if let Event::Start(Tag::Heading { level, .. }) = &event {
            open = Some(OpenHeading {
                start: out.len(),
                level: *level as u8,
                text: String::new(),
            });
        } else if let Event::End(TagEnd::Heading(_)) = &event {
            if let Some(heading) = open.take() {
                let text = heading.text.trim();
                if !text.is_empty() && heading.level <= max_level {
                    let id = slugs.allocate(text);
                    if let Some(Event::Start(Tag::Heading { id: slot, .. })) =
                        out.get_mut(heading.start)
                    {
                        *slot = Some(CowStr::from(id.clone()));
                    }
                    let position = headers.len();
                    headers.push(HeaderRecord::new(heading.level, text, id, 1, position)?);
                }
            }
        } else if let (Some(heading), Event::Text(text) | Event::Code(text)) =
            (open.as_mut(), &event)
        {
            heading.text.push_str(text);
        }
        out.push(event);
    }
    Ok((out, headers))
}

fn replace_markers<'a>(events: Vec<Event<'a>>, toc: &str, policy: MarkerPolicy) -> Vec<Event<'a>> {
    let mut out = Vec::with_capacity(events.len());
    let mut paragraph: Option<Vec<Event<'a>>> = None;
    let mut replaced = 0usize;

    for event in events {
        let Some(mut buffer) = paragraph.take() else {
            if matches!(event, Event::Start(Tag::Paragraph)) {
                paragraph = Some(vec![event]);
            } else {
                out.push(event);
            }
            continue;
        };
        if !matches!(event, Event::End(TagEnd::Paragraph)) {
            buffer.push(event);
            paragraph = Some(buffer);
            continue;
        }

        let allowed = policy == MarkerPolicy::All || replaced == 0;
        if allowed && is_marker_paragraph(&buffer) {
            tracing::debug!("replacing marker paragraph");
            out.push(Event::Html(CowStr::from(toc.to_string())));
            replaced += 1;
        } else {
            out.extend(buffer);
            out.push(event);
        }
    }
    if let Some(buffer) = paragraph {
        out.extend(buffer);
    }
    out
}

/// Whether a buffered paragraph (its start event included) holds nothing but the marker.
fn is_marker_paragraph(buffer: &[Event<'_>]) -> bool {
    let mut text = String::new();
    for event in buffer.iter().skip(1) {
        if let Event::Text(t) = event {
            text.push_str(t);
        } else if matches!(event, Event::SoftBreak) {
            text.push(' ');
        } else {
            return false;
        }
    }
    marker::is_marker(&text)
}
