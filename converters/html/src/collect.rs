//! Thread-wide header collection.
//!
//! This is the single source of truth for header ids: every other consumer (rendering, id
//! stamping, client sync) works from the list produced here instead of recomputing ids.

use threadtoc_core::{HeaderRecord, Post, Settings, SlugAllocator, Thread};

use crate::extract::extract;

/// Collect the headers of every post in `thread`, in ascending post order, with ids that
/// are unique across the whole thread.
#[tracing::instrument(skip_all, fields(posts = thread.posts.len()))]
#[must_use]
pub fn collect_thread_headers(thread: &Thread, settings: &Settings) -> Vec<HeaderRecord> {
    collect_headers(thread.ordered_posts(), settings)
}

/// Collect headers from `posts`, which must already be in ascending post-number order.
///
/// One [`SlugAllocator`] is shared by all posts, so the first occurrence of a text keeps
/// the bare slug wherever it appears in the thread.
#[must_use]
pub fn collect_headers<'a, I>(posts: I, settings: &Settings) -> Vec<HeaderRecord>
where
    I: IntoIterator<Item = &'a Post>,
{
    let max_level = settings.effective_max_level();
    let mut slugs = SlugAllocator::new();
    let mut records = Vec::new();

    for post in posts {
        let extracted = extract(&post.cooked, max_level);
        tracing::debug!(
            post_number = post.number,
            headers = extracted.len(),
            "extracted post headers"
        );
        for (position, header) in extracted.into_iter().enumerate() {
            let id = slugs.allocate(&header.text);
            match HeaderRecord::new(header.level, header.text, id, post.number, position) {
                Ok(record) => records.push(record.with_html(header.html)),
                Err(e) => {
                    tracing::warn!(post_number = post.number, error = %e, "dropping header");
                }
            }
        }
    }
    records
}

/// The headers serialized alongside a post: the full thread list for the first post when
/// the feature is enabled, nothing otherwise.
#[must_use]
pub fn topic_headers(thread: &Thread, post_number: u32, settings: &Settings) -> Vec<HeaderRecord> {
    if !settings.enabled || post_number != 1 {
        return Vec::new();
    }
    collect_thread_headers(thread, settings)
}
