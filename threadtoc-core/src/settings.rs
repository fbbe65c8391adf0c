//! Site configuration for table of contents generation.
//!
//! [`Settings`] deserializes from any serde format with every field optional, and can be
//! built in code with [`Settings::builder()`].

use serde::{Deserialize, Serialize};

use crate::{HeadingLevel, MAX_HEADING_LEVEL};

/// Default title shown above the generated list.
pub const DEFAULT_TITLE: &str = "Table of Contents";

/// Default prefix for every CSS class the renderer emits.
pub const DEFAULT_CLASS_PREFIX: &str = "thread-toc";

/// Default delay before the deferred scroll after cross-post navigation.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// What to render where a marker asks for a table of contents but fewer than two headers
/// exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPolicy {
    /// Render nothing; the marker paragraph stays as it is.
    #[default]
    Omit,
    /// Replace the marker with a "no headers found" placeholder.
    Placeholder,
}

/// How many marker paragraphs get replaced when a post contains more than one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPolicy {
    /// Only the first marker paragraph in document order.
    #[default]
    First,
    /// Every marker paragraph.
    All,
}

/// Configuration for extraction, rendering and client behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Settings {
    /// Master switch. When off, no headers are serialized and posts are left untouched.
    pub enabled: bool,
    /// Deepest heading level that is collected.
    pub max_level: HeadingLevel,
    /// Strict single-level mode: only level 1 headings are collected.
    pub strict: bool,
    pub empty_policy: EmptyPolicy,
    pub marker_policy: MarkerPolicy,
    pub title: String,
    pub class_prefix: String,
    /// Delay in milliseconds before the one-shot scroll retry after navigating to another post.
    pub retry_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_level: MAX_HEADING_LEVEL,
            strict: false,
            empty_policy: EmptyPolicy::default(),
            marker_policy: MarkerPolicy::default(),
            title: DEFAULT_TITLE.to_string(),
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl Settings {
    /// Create a new builder with default values.
    #[must_use]
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// The deepest heading level to collect, after applying strict mode and clamping into
    /// `1..=6`.
    #[must_use]
    pub fn effective_max_level(&self) -> HeadingLevel {
        if self.strict {
            1
        } else {
            self.max_level.clamp(1, MAX_HEADING_LEVEL)
        }
    }

    /// Build a CSS class name from the configured prefix, e.g. `class("title")`.
    ///
    /// An empty suffix yields the prefix itself.
    #[must_use]
    pub fn class(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            self.class_prefix.clone()
        } else {
            format!("{}-{suffix}", self.class_prefix)
        }
    }

    /// The deferred scroll delay as a [`std::time::Duration`].
    #[must_use]
    pub fn retry_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.retry_delay_ms)
    }
}

/// Builder for [`Settings`].
///
/// Use [`Settings::builder()`] to create a new builder.
#[derive(Debug, Default, Clone)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.settings.enabled = enabled;
        self
    }

    #[must_use]
    pub fn max_level(mut self, max_level: HeadingLevel) -> Self {
        self.settings.max_level = max_level;
        self
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.settings.strict = strict;
        self
    }

    #[must_use]
    pub fn empty_policy(mut self, policy: EmptyPolicy) -> Self {
        self.settings.empty_policy = policy;
        self
    }

    #[must_use]
    pub fn marker_policy(mut self, policy: MarkerPolicy) -> Self {
        self.settings.marker_policy = policy;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.settings.title = title.into();
        self
    }

    #[must_use]
    pub fn class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.settings.class_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn retry_delay_ms(mut self, delay: u64) -> Self {
        self.settings.retry_delay_ms = delay;
        self
    }

    /// Build the [`Settings`].
    #[must_use]
    pub fn build(self) -> Settings {
        self.settings
    }
}
