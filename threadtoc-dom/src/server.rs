//! Server-side decoration: ids and the table of contents travel inside the content.

use threadtoc_converters_html::collect_thread_headers;
use threadtoc_core::{HeaderRecord, Post, Settings, Thread};

use crate::{Dom, MemoryDom, Reconciler};

/// Write the ids of `headers` onto the headings of `post` and return the new markup.
///
/// Only the records of this post are used; see [`Reconciler::sync_ids`].
#[must_use]
pub fn stamp_heading_ids(post: &Post, headers: &[HeaderRecord], settings: &Settings) -> String {
    let mut dom = MemoryDom::parse(&post.cooked);
    let root = dom.root();
    Reconciler::new(settings, headers, None).sync_ids(&mut dom, root, post.number);
    dom.to_html()
}

/// Decorate every post of `thread`: heading ids stamped everywhere, the marker replaced in
/// the first post.
///
/// Posts come back ordered by number. A post that fails to decorate is returned as it was.
#[tracing::instrument(skip_all, fields(posts = thread.posts.len()))]
#[must_use]
pub fn decorate_thread(thread: &Thread, settings: &Settings) -> Vec<Post> {
    if !settings.enabled {
        return thread.ordered_posts().into_iter().cloned().collect();
    }
    let headers = collect_thread_headers(thread, settings);
    let reconciler = Reconciler::new(settings, &headers, thread.path());
    thread
        .ordered_posts()
        .into_iter()
        .map(|post| Post::new(post.number, reconciler.decorate_or_original::<MemoryDom>(post)))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn stamps_only_own_post() {
        let settings = Settings::default();
        let thread = Thread {
            url: Some("/t/topic/7".into()),
            posts: vec![Post::new(2, "<h2>Intro</h2>"), Post::new(1, "<h1>Intro</h1>")],
        };
        let headers = collect_thread_headers(&thread, &settings);
        let second = Post::new(2, "<h2>Intro</h2>");
        assert_eq!(
            stamp_heading_ids(&second, &headers, &settings),
            "<h2 id=\"intro-1\">Intro</h2>"
        );
    }

    #[rstest]
    #[case::enabled(true, "<h2 id=\"reply\">Reply</h2>")]
    #[case::disabled(false, "<h2>Reply</h2>")]
    fn decorates_in_post_order(#[case] enabled: bool, #[case] reply: &str) {
        let settings = Settings::builder().enabled(enabled).build();
        let thread = Thread {
            url: Some("/t/topic/7".into()),
            posts: vec![
                Post::new(2, "<h2>Reply</h2>"),
                Post::new(1, "<p>[toc]</p><h1>Intro</h1>"),
            ],
        };
        let posts = decorate_thread(&thread, &settings);
        let numbers: Vec<_> = posts.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(
            posts.first().is_some_and(|p| p.cooked.contains("[toc]")),
            !enabled
        );
        assert_eq!(posts.get(1).map(|p| p.cooked.as_str()), Some(reply));
    }

    #[test]
    fn keeps_styles_and_svg_links_intact() {
        let settings = Settings::default();
        let styled = "<style>a > b { color: red }</style>\
            <svg viewBox=\"0 0 1 1\"><use xlink:href=\"#x\"></use></svg>";
        let thread = Thread {
            url: Some("/t/topic/7".into()),
            posts: vec![
                Post::new(1, format!("<h1>Intro</h1>{styled}")),
                Post::new(2, styled),
            ],
        };
        let posts = decorate_thread(&thread, &settings);
        let cooked: Vec<_> = posts.iter().map(|p| p.cooked.as_str()).collect();
        assert_eq!(
            cooked,
            vec![format!("<h1 id=\"intro\">Intro</h1>{styled}").as_str(), styled]
        );
    }
}
