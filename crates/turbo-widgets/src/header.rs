//! Sticky header shadow on scroll.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Scroll offset beyond which the header counts as scrolled.
    pub scrolled_threshold_px: f32,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold_px: 100.0,
        }
    }
}

/// Tracks whether the page has scrolled past the threshold.
#[derive(Debug, Clone, Default)]
pub struct StickyHeader {
    config: HeaderConfig,
    scrolled: bool,
}

impl StickyHeader {
    pub fn new(config: HeaderConfig) -> Self {
        Self {
            config,
            scrolled: false,
        }
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    /// Feed the current scroll offset. Returns true when `scrolled` flipped.
    pub fn on_scroll(&mut self, offset_px: f32) -> bool {
        let scrolled = offset_px > self.config.scrolled_threshold_px;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }
}
