//! One-shot deferred scrolling after cross-post navigation.

use std::time::Duration;

use crate::Dom;

/// A scroll to a header that may only exist once the destination post has loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeferredScroll {
    pub header_id: String,
}

impl DeferredScroll {
    #[must_use]
    pub fn new(header_id: impl Into<String>) -> Self {
        Self {
            header_id: header_id.into(),
        }
    }

    /// Scroll to the header if it exists by now. A missing target is not an error.
    pub fn fire<D: Dom>(&self, dom: &mut D) -> bool {
        let Some(target) = dom.element_by_id(&self.header_id) else {
            tracing::debug!(id = %self.header_id, "deferred scroll target never appeared");
            return false;
        };
        dom.scroll_into_view(target);
        true
    }
}

/// Runs a task once after a delay. Scheduled tasks cannot be cancelled.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, task: DeferredScroll);
}

/// A [`Scheduler`] driven by an explicit clock, for hosts without their own timers.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    pending: Vec<(Duration, DeferredScroll)>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and fire every task that has come due, each exactly once.
    ///
    /// Returns how many of them found their target.
    pub fn advance<D: Dom>(&mut self, elapsed: Duration, dom: &mut D) -> usize {
        self.now = self.now.saturating_add(elapsed);
        let now = self.now;
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = waiting;
        due.into_iter().filter(|(_, task)| task.fire(dom)).count()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration, task: DeferredScroll) {
        tracing::debug!(
            id = %task.header_id,
            delay_ms = delay.as_millis(),
            "scheduled deferred scroll"
        );
        self.pending.push((self.now.saturating_add(delay), task));
    }
}
