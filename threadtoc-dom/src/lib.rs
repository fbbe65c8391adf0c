//! The client half of thread tables of contents, behind a document capability.
//!
//! Once a post is on screen the [`Reconciler`] gives its headings the ids computed by the
//! thread-wide collector, swaps the `[toc]` marker in the first post for the rendered
//! table, and reports the nodes a host needs to attach click handlers to. All document
//! access goes through the [`Dom`] trait; [`MemoryDom`] implements it without a browser,
//! which is also how [`decorate_thread`] does the same work on the server.
//!
//! # Example
//!
//! ```
//! use threadtoc_core::{Post, Settings, Thread};
//! use threadtoc_dom::decorate_thread;
//!
//! let thread = Thread {
//!     url: Some("/t/welcome/42".into()),
//!     posts: vec![
//!         Post::new(1, "<p>[toc]</p><h1>Intro</h1>"),
//!         Post::new(2, "<h2>Intro</h2>"),
//!     ],
//! };
//! let posts = decorate_thread(&thread, &Settings::default());
//! assert!(posts[0].cooked.starts_with("<div class=\"thread-toc\">"));
//! assert_eq!(posts[1].cooked, "<h2 id=\"intro-1\">Intro</h2>");
//! ```

mod dom;
mod error;
mod memory;
mod reconcile;
mod scheduler;
mod server;

pub use dom::{Document, Dom};
pub use error::Error;
pub use memory::{DomNode, MemoryDom};
pub use reconcile::{COLLAPSED_CLASS, ClickOutcome, LinkBinding, Reconciler, TocBindings};
pub use scheduler::{DeferredScroll, Scheduler, TimerQueue};
pub use server::{decorate_thread, stamp_heading_ids};
