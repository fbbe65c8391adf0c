//! Threads and posts as handed over by the host.

use serde::{Deserialize, Serialize};

/// A post with its host-rendered, already sanitized content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// 1-based position of the post in its thread.
    pub number: u32,
    /// Rendered HTML fragment.
    #[serde(default)]
    pub cooked: String,
}

impl Post {
    #[must_use]
    pub fn new(number: u32, cooked: impl Into<String>) -> Self {
        Self {
            number,
            cooked: cooked.into(),
        }
    }
}

/// A discussion thread: an ordered collection of posts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    /// URL path the thread is served under, e.g. `/t/some-topic/42`.
    ///
    /// A path with a trailing post number is accepted and trimmed by [`ThreadPath`].
    #[serde(default)]
    pub url: Option<String>,
    pub posts: Vec<Post>,
}

impl Thread {
    /// The thread's base path, if its URL has the `/t/{slug}/{id}` shape.
    #[must_use]
    pub fn path(&self) -> Option<ThreadPath> {
        self.url.as_deref().and_then(ThreadPath::from_url_path)
    }

    /// Posts in ascending post-number order.
    #[must_use]
    pub fn ordered_posts(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        posts.sort_by_key(|post| post.number);
        posts
    }

    /// The post numbered 1, if present.
    #[must_use]
    pub fn first_post(&self) -> Option<&Post> {
        self.posts.iter().find(|post| post.number == 1)
    }
}

/// The base path of a thread, used to build links into individual posts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadPath(String);

impl ThreadPath {
    /// Extract the base path from a URL path of the form `/t/{slug}/{id}[/...]`.
    ///
    /// Returns `None` for anything that does not start with that shape.
    #[must_use]
    pub fn from_url_path(path: &str) -> Option<Self> {
        let mut segments = path.strip_prefix("/t/")?.split('/');
        let slug = segments.next().filter(|s| !s.is_empty())?;
        let id = segments
            .next()
            .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))?;
        Some(Self(format!("/t/{slug}/{id}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Link to a header: the bare base path for the first post, otherwise the post's own
    /// path with the header id as fragment.
    #[must_use]
    pub fn header_href(&self, post_number: u32, id: &str) -> String {
        if post_number <= 1 {
            self.0.clone()
        } else {
            format!("{}/{post_number}#{id}", self.0)
        }
    }
}

impl std::fmt::Display for ThreadPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
