//! Bringing a rendered post in line with the thread's header records.

use threadtoc_converters_html::TocRenderer;
use threadtoc_core::{HeaderRecord, MarkerPolicy, Post, Settings, ThreadPath, marker};

use crate::{DeferredScroll, Document, Dom, Error, Scheduler};

/// Class toggled on a container whose list is hidden.
pub const COLLAPSED_CLASS: &str = "collapsed";

/// What the host should do with a click on a TOC link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The target was scrolled to; default navigation must be prevented.
    Scrolled,
    /// Let the link navigate.
    Navigate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkBinding<N> {
    pub node: N,
    pub post_number: u32,
    pub header_id: String,
}

/// The interactive parts of one rendered table of contents.
///
/// Hosts attach click listeners to `title` and every link node, then dispatch to
/// [`Reconciler::toggle`] and [`Reconciler::click_link`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocBindings<N> {
    pub container: N,
    pub title: Option<N>,
    pub list: Option<N>,
    pub links: Vec<LinkBinding<N>>,
}

/// Applies the thread's header records to rendered posts.
///
/// Ids come only from `headers`; the reconciler never derives an id from heading text.
#[derive(Debug)]
pub struct Reconciler<'a> {
    settings: &'a Settings,
    headers: &'a [HeaderRecord],
    path: Option<ThreadPath>,
}

impl<'a> Reconciler<'a> {
    #[must_use]
    pub fn new(
        settings: &'a Settings,
        headers: &'a [HeaderRecord],
        path: Option<ThreadPath>,
    ) -> Self {
        Self {
            settings,
            headers,
            path,
        }
    }

    /// Give the qualifying headings of post `post_number` the ids of their records.
    ///
    /// Headings are paired with records by their position among the post's non-empty
    /// headings. Headings that already have an id keep it. Returns the number of ids
    /// assigned.
    pub fn sync_ids<D: Dom>(&self, dom: &mut D, scope: D::Node, post_number: u32) -> usize {
        let headings: Vec<_> = dom
            .headings(scope, self.settings.effective_max_level())
            .into_iter()
            .filter(|(node, _)| !dom.text_content(*node).trim().is_empty())
            .collect();
        let mut assigned = 0;
        for (position, (node, level)) in headings.into_iter().enumerate() {
            let Some(record) = self
                .headers
                .iter()
                .find(|h| h.post_number == post_number && h.position == position)
            else {
                break;
            };
            if record.level != level {
                tracing::warn!(
                    post_number,
                    position,
                    expected = record.level,
                    found = level,
                    "heading does not match its record, stopping id sync"
                );
                break;
            }
            if dom.id(node).is_some() {
                continue;
            }
            dom.set_id(node, &record.id);
            assigned += 1;
        }
        tracing::debug!(post_number, assigned, "synced heading ids");
        assigned
    }

    /// Replace marker paragraphs inside `scope` with the rendered table of contents.
    ///
    /// Returns the inserted containers. Nothing changes when there is no marker or when
    /// the thread has too few headers and no placeholder is wanted.
    ///
    /// # Errors
    ///
    /// Returns an error if the table of contents cannot be rendered or spliced in.
    pub fn replace_marker<D: Dom>(
        &self,
        dom: &mut D,
        scope: D::Node,
    ) -> Result<Vec<D::Node>, Error> {
        let markers: Vec<_> = dom
            .paragraphs(scope)
            .into_iter()
            .filter(|node| marker::is_marker(&dom.text_content(*node)))
            .collect();
        if markers.is_empty() {
            return Ok(Vec::new());
        }
        let renderer = TocRenderer::for_thread(self.settings, self.path.clone());
        let Some(toc) = renderer.render(self.headers)? else {
            tracing::debug!(headers = self.headers.len(), "marker left in place");
            return Ok(Vec::new());
        };

        let limit = match self.settings.marker_policy {
            MarkerPolicy::First => 1,
            MarkerPolicy::All => markers.len(),
        };
        let mut inserted = Vec::new();
        for paragraph in markers.into_iter().take(limit) {
            inserted.extend(dom.replace_with_markup(paragraph, &toc)?);
        }
        tracing::debug!(replaced = limit, "replaced toc marker");
        Ok(inserted)
    }

    /// Find every table of contents inside `scope` and the nodes that need listeners.
    #[must_use]
    pub fn wire<D: Dom>(&self, dom: &D, scope: D::Node) -> Vec<TocBindings<D::Node>> {
        let class = |suffix: &str| self.settings.class(suffix);
        dom.elements_with_class(scope, &class(""))
            .into_iter()
            .map(|container| TocBindings {
                container,
                title: dom.elements_with_class(container, &class("title")).first().copied(),
                list: dom.elements_with_class(container, &class("list")).first().copied(),
                links: dom
                    .elements_with_class(container, &class("link"))
                    .into_iter()
                    .map(|node| LinkBinding {
                        node,
                        post_number: dom
                            .attribute(node, "data-post-number")
                            .and_then(|n| n.trim().parse().ok())
                            .filter(|n| *n > 0)
                            .unwrap_or(1),
                        header_id: dom.attribute(node, "data-header-id").unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Handle a click on a TOC link.
    ///
    /// A header in the first post that is already in the document is scrolled to. Anything
    /// else navigates, and one deferred scroll is scheduled for when the target has loaded.
    pub fn click_link<D: Dom, S: Scheduler>(
        &self,
        dom: &mut D,
        scheduler: &mut S,
        link: &LinkBinding<D::Node>,
    ) -> ClickOutcome {
        if link.header_id.is_empty() {
            return ClickOutcome::Navigate;
        }
        if link.post_number == 1
            && let Some(target) = dom.element_by_id(&link.header_id)
        {
            dom.scroll_into_view(target);
            return ClickOutcome::Scrolled;
        }
        scheduler.schedule(
            self.settings.retry_delay(),
            DeferredScroll::new(link.header_id.clone()),
        );
        ClickOutcome::Navigate
    }

    /// Collapse or expand a table of contents. Returns whether it is now collapsed.
    pub fn toggle<D: Dom>(&self, dom: &mut D, bindings: &TocBindings<D::Node>) -> bool {
        let Some(list) = bindings.list else {
            return false;
        };
        let collapse = !dom.is_hidden(list);
        dom.set_hidden(list, collapse);
        if collapse {
            dom.add_class(bindings.container, COLLAPSED_CLASS);
        } else {
            dom.remove_class(bindings.container, COLLAPSED_CLASS);
        }
        collapse
    }

    /// Everything that happens once a post is on screen: id sync, marker replacement for
    /// the first post, then wiring.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be replaced.
    pub fn decorate<D: Dom>(
        &self,
        dom: &mut D,
        scope: D::Node,
        post_number: u32,
    ) -> Result<Vec<TocBindings<D::Node>>, Error> {
        if !self.settings.enabled {
            return Ok(Vec::new());
        }
        self.sync_ids(dom, scope, post_number);
        if post_number == 1 {
            self.replace_marker(dom, scope)?;
        }
        Ok(self.wire(dom, scope))
    }

    /// Decorate a post's rendered content on the server: ids stamped onto its headings
    /// and, for the first post, the marker replaced.
    ///
    /// A post that needs neither comes back exactly as it was cooked.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker cannot be replaced.
    pub fn decorate_post<D: Document>(&self, post: &Post) -> Result<String, Error> {
        if !self.settings.enabled {
            return Ok(post.cooked.clone());
        }
        let mut dom = D::parse(&post.cooked);
        let root = dom.root();
        let assigned = self.sync_ids(&mut dom, root, post.number);
        let inserted = if post.number == 1 {
            self.replace_marker(&mut dom, root)?.len()
        } else {
            0
        };
        if assigned == 0 && inserted == 0 {
            return Ok(post.cooked.clone());
        }
        Ok(dom.to_html())
    }

    /// [`Reconciler::decorate_post`], falling back to the untouched content on failure.
    #[must_use]
    pub fn decorate_or_original<D: Document>(&self, post: &Post) -> String {
        match self.decorate_post::<D>(post) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(
                    post_number = post.number,
                    error = %e,
                    "showing post undecorated"
                );
                post.cooked.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use threadtoc_core::{EmptyPolicy, Settings};

    use ego_tree::NodeId;

    use super::*;
    use crate::{MemoryDom, TimerQueue};

    /// A document whose splices always fail.
    struct SealedDom(MemoryDom);

    impl Dom for SealedDom {
        type Node = NodeId;

        fn root(&self) -> NodeId {
            self.0.root()
        }

        fn headings(
            &self,
            scope: NodeId,
            max_level: threadtoc_core::HeadingLevel,
        ) -> Vec<(NodeId, threadtoc_core::HeadingLevel)> {
            self.0.headings(scope, max_level)
        }

        fn paragraphs(&self, scope: NodeId) -> Vec<NodeId> {
            self.0.paragraphs(scope)
        }

        fn elements_with_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
            self.0.elements_with_class(scope, class)
        }

        fn text_content(&self, node: NodeId) -> String {
            self.0.text_content(node)
        }

        fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
            self.0.attribute(node, name)
        }

        fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
            self.0.set_attribute(node, name, value);
        }

        fn remove_attribute(&mut self, node: NodeId, name: &str) {
            self.0.remove_attribute(node, name);
        }

        fn element_by_id(&self, id: &str) -> Option<NodeId> {
            self.0.element_by_id(id)
        }

        fn replace_with_markup(&mut self, _: NodeId, _: &str) -> Result<Vec<NodeId>, Error> {
            Err(Error::DetachedNode)
        }

        fn scroll_into_view(&mut self, node: NodeId) {
            self.0.scroll_into_view(node);
        }
    }

    impl Document for SealedDom {
        fn parse(markup: &str) -> Self {
            Self(MemoryDom::parse(markup))
        }

        fn to_html(&self) -> String {
            self.0.to_html()
        }
    }

    fn record(
        level: u8,
        text: &str,
        post_number: u32,
        position: usize,
    ) -> Result<HeaderRecord, Error> {
        let id = threadtoc_core::base_slug(text);
        Ok(HeaderRecord::new(level, text, id, post_number, position)?)
    }

    fn headers() -> Result<Vec<HeaderRecord>, Error> {
        Ok(vec![
            record(1, "Intro", 1, 0)?,
            record(2, "Setup", 1, 1)?,
            record(2, "Answer", 3, 0)?,
        ])
    }

    fn path() -> Option<ThreadPath> {
        ThreadPath::from_url_path("/t/topic/7")
    }

    #[test]
    fn sync_pairs_by_position() -> Result<(), Error> {
        let settings = Settings::default();
        let headers = headers()?;
        let reconciler = Reconciler::new(&settings, &headers, path());
        let mut dom = MemoryDom::parse("<h1>Intro</h1><h2> </h2><h2 id=\"custom\">Setup</h2>");
        let root = dom.root();

        assert_eq!(reconciler.sync_ids(&mut dom, root, 1), 1);
        assert_eq!(
            dom.to_html(),
            "<h1 id=\"intro\">Intro</h1><h2> </h2><h2 id=\"custom\">Setup</h2>"
        );
        Ok(())
    }

    #[test]
    fn identical_headings_get_distinct_ids() -> Result<(), Error> {
        let settings = Settings::default();
        let headers = vec![
            record(2, "Same", 2, 0)?,
            HeaderRecord::new(2, "Same", "same-1", 2, 1)?,
        ];
        let reconciler = Reconciler::new(&settings, &headers, path());
        let mut dom = MemoryDom::parse("<h2>Same</h2><h2>Same</h2>");
        let root = dom.root();
        reconciler.sync_ids(&mut dom, root, 2);
        assert_eq!(
            dom.to_html(),
            "<h2 id=\"same\">Same</h2><h2 id=\"same-1\">Same</h2>"
        );
        Ok(())
    }

    #[test]
    fn level_mismatch_stops_sync() -> Result<(), Error> {
        let settings = Settings::default();
        let headers = headers()?;
        let reconciler = Reconciler::new(&settings, &headers, path());
        let mut dom = MemoryDom::parse("<h3>Edited</h3><h2>Setup</h2>");
        let root = dom.root();
        assert_eq!(reconciler.sync_ids(&mut dom, root, 1), 0);
        Ok(())
    }

    #[test]
    fn marker_replacement_respects_gate() -> Result<(), Error> {
        let settings = Settings::default();
        let few = vec![record(1, "Intro", 1, 0)?];
        let reconciler = Reconciler::new(&settings, &few, path());
        let mut dom = MemoryDom::parse("<p>[toc]</p><h1>Intro</h1>");
        let root = dom.root();
        assert!(reconciler.replace_marker(&mut dom, root)?.is_empty());
        assert_eq!(dom.to_html(), "<p>[toc]</p><h1>Intro</h1>");

        let placeholder = Settings::builder().empty_policy(EmptyPolicy::Placeholder).build();
        let reconciler = Reconciler::new(&placeholder, &few, path());
        assert_eq!(reconciler.replace_marker(&mut dom, root)?.len(), 1);
        assert!(dom.to_html().contains("No headers found"));
        Ok(())
    }

    #[test]
    fn marker_policy_first_or_all() -> Result<(), Error> {
        let headers = headers()?;
        let markup = "<p>[toc]</p><p>text [toc]</p><p>\\[toc\\]</p>";

        let first = Settings::default();
        let mut dom = MemoryDom::parse(markup);
        let root = dom.root();
        let inserted = Reconciler::new(&first, &headers, path()).replace_marker(&mut dom, root)?;
        assert_eq!(inserted.len(), 1);
        assert_eq!(dom.paragraphs(root).len(), 2);

        let all = Settings::builder().marker_policy(MarkerPolicy::All).build();
        let mut dom = MemoryDom::parse(markup);
        let root = dom.root();
        let inserted = Reconciler::new(&all, &headers, path()).replace_marker(&mut dom, root)?;
        assert_eq!(inserted.len(), 2);
        assert_eq!(dom.paragraphs(root).len(), 1);
        Ok(())
    }

    #[test]
    fn clicks_scroll_or_navigate() -> Result<(), Error> {
        let settings = Settings::default();
        let headers = headers()?;
        let reconciler = Reconciler::new(&settings, &headers, path());
        let mut dom = MemoryDom::parse("<p>[toc]</p><h1>Intro</h1><h2>Setup</h2>");
        let root = dom.root();
        let bindings = reconciler.decorate(&mut dom, root, 1)?;
        let toc = bindings.first().ok_or(Error::DetachedNode)?;
        assert_eq!(toc.links.len(), 3);

        let mut timers = TimerQueue::new();
        let [intro, _, answer] = toc.links.as_slice() else {
            return Err(Error::DetachedNode);
        };
        assert_eq!(intro.post_number, 1);
        assert_eq!(
            reconciler.click_link(&mut dom, &mut timers, intro),
            ClickOutcome::Scrolled
        );
        assert_eq!(dom.scrolled().len(), 1);
        assert_eq!(timers.pending(), 0);

        assert_eq!(answer.post_number, 3);
        assert_eq!(answer.header_id, "answer");
        assert_eq!(
            reconciler.click_link(&mut dom, &mut timers, answer),
            ClickOutcome::Navigate
        );
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.advance(Duration::from_millis(500), &mut dom), 0);
        Ok(())
    }

    #[test]
    fn toggle_hides_list_and_marks_container() -> Result<(), Error> {
        let settings = Settings::default();
        let headers = headers()?;
        let reconciler = Reconciler::new(&settings, &headers, path());
        let mut dom = MemoryDom::parse("<p>[toc]</p>");
        let root = dom.root();
        let bindings = reconciler.decorate(&mut dom, root, 1)?;
        let toc = bindings.first().ok_or(Error::DetachedNode)?;
        let list = toc.list.ok_or(Error::DetachedNode)?;
        assert!(toc.title.is_some());

        assert!(reconciler.toggle(&mut dom, toc));
        assert!(dom.is_hidden(list));
        assert!(dom.has_class(toc.container, COLLAPSED_CLASS));

        assert!(!reconciler.toggle(&mut dom, toc));
        assert!(!dom.is_hidden(list));
        assert!(!dom.has_class(toc.container, COLLAPSED_CLASS));
        Ok(())
    }

    #[test]
    fn disabled_leaves_post_alone() -> Result<(), Error> {
        let settings = Settings::builder().enabled(false).build();
        let headers = headers()?;
        let reconciler = Reconciler::new(&settings, &headers, path());
        let post = Post::new(1, "<p>[toc]</p><h1>Intro</h1>");
        assert_eq!(reconciler.decorate_post::<MemoryDom>(&post)?, post.cooked);
        Ok(())
    }

    #[test]
    #[tracing_test::traced_test]
    fn failed_splice_shows_post_undecorated() -> Result<(), Error> {
        let settings = Settings::default();
        let headers = headers()?;
        let reconciler = Reconciler::new(&settings, &headers, path());
        let post = Post::new(1, "<p>[toc]</p><h1>Intro</h1><h2>Setup</h2>");
        assert!(reconciler.decorate_post::<SealedDom>(&post).is_err());
        assert_eq!(reconciler.decorate_or_original::<SealedDom>(&post), post.cooked);
        assert!(logs_contain("showing post undecorated"));
        Ok(())
    }

    #[test]
    fn untouched_post_is_not_reserialized() -> Result<(), Error> {
        let settings = Settings::default();
        let headers = headers()?;
        let reconciler = Reconciler::new(&settings, &headers, path());
        let cooked = "<p>no headings <b>here</b></p><style>a > b { color: red }</style>";
        let post = Post::new(2, cooked);
        assert_eq!(reconciler.decorate_post::<MemoryDom>(&post)?, cooked);

        let post = Post::new(3, "<h2>Answer</h2><STYLE>a > b {}</STYLE>");
        assert_eq!(
            reconciler.decorate_post::<MemoryDom>(&post)?,
            "<h2 id=\"answer\">Answer</h2><style>a > b {}</style>"
        );
        Ok(())
    }
}
