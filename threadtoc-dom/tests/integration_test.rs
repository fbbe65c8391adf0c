use std::time::Duration;

use pretty_assertions::assert_eq;
use threadtoc_converters_html::topic_headers;
use threadtoc_core::{Post, Settings, Thread};
use threadtoc_dom::{ClickOutcome, Dom, MemoryDom, Reconciler, TimerQueue};

type Error = Box<dyn std::error::Error>;

fn thread() -> Thread {
    Thread {
        url: Some("/t/release-notes/12".into()),
        posts: vec![
            Post::new(
                1,
                "<p>[toc]</p><h1>Overview</h1><p>text</p><h2>Install</h2><h2>Install</h2>",
            ),
            Post::new(2, "<p>reply without headings</p>"),
            Post::new(3, "<h2>Install</h2><h3>On <a href=\"/linux\">Linux</a></h3>"),
        ],
    }
}

/// The page as a browser would show it: every post's cooked content in its own container.
fn page(thread: &Thread) -> String {
    thread
        .posts
        .iter()
        .map(|post| {
            format!(
                "<div class=\"cooked\" data-post-number=\"{}\">{}</div>",
                post.number, post.cooked
            )
        })
        .collect()
}

#[test]
#[tracing_test::traced_test]
fn client_reconciles_whole_page() -> Result<(), Error> {
    let settings = Settings::default();
    let thread = thread();
    let headers = topic_headers(&thread, 1, &settings);
    let ids: Vec<_> = headers.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["overview", "install", "install-1", "install-2", "on-linux"]);

    let reconciler = Reconciler::new(&settings, &headers, thread.path());
    let mut dom = MemoryDom::parse(&page(&thread));
    let posts = dom.elements_with_class(dom.root(), "cooked");
    let mut bindings = Vec::new();
    for post in posts {
        let number = dom
            .attribute(post, "data-post-number")
            .and_then(|n| n.parse().ok())
            .ok_or("post number")?;
        bindings.extend(reconciler.decorate(&mut dom, post, number)?);
    }
    assert_eq!(bindings.len(), 1);
    for id in ids {
        assert!(dom.element_by_id(id).is_some(), "missing heading id {id}");
    }

    let toc = bindings.first().ok_or("no toc")?;
    let targets: Vec<_> = toc
        .links
        .iter()
        .map(|link| (link.post_number, link.header_id.as_str()))
        .collect();
    assert_eq!(
        targets,
        vec![
            (1, "overview"),
            (1, "install"),
            (1, "install-1"),
            (3, "install-2"),
            (3, "on-linux"),
        ]
    );

    let mut timers = TimerQueue::new();
    let last = toc.links.last().ok_or("no links")?;
    assert_eq!(
        reconciler.click_link(&mut dom, &mut timers, last),
        ClickOutcome::Navigate
    );
    assert_eq!(timers.advance(Duration::from_millis(500), &mut dom), 1);
    assert_eq!(dom.scrolled().len(), 1);
    Ok(())
}

#[test]
fn server_and_client_agree_on_ids() -> Result<(), Error> {
    let settings = Settings::default();
    let thread = thread();
    let decorated = threadtoc_dom::decorate_thread(&thread, &settings);
    let headers = topic_headers(&thread, 1, &settings);
    let reconciler = Reconciler::new(&settings, &headers, thread.path());

    for post in &decorated {
        let mut dom = MemoryDom::parse(&post.cooked);
        let root = dom.root();
        assert_eq!(reconciler.sync_ids(&mut dom, root, post.number), 0);
    }
    let third = decorated.iter().find(|p| p.number == 3).ok_or("post 3")?;
    assert_eq!(
        third.cooked,
        "<h2 id=\"install-2\">Install</h2><h3 id=\"on-linux\">On <a href=\"/linux\">Linux</a></h3>"
    );
    Ok(())
}

#[test]
fn too_few_headers_keep_marker() {
    let settings = Settings::default();
    let headers = Vec::new();
    let reconciler = Reconciler::new(&settings, &headers, None);
    let post = Post::new(1, "<p>[toc]</p>");
    assert_eq!(reconciler.decorate_or_original::<MemoryDom>(&post), post.cooked);
}
