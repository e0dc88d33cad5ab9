//! Off-canvas category sidebar for small screens.

use serde::{Deserialize, Serialize};

/// Sidebar tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Viewport widths above this are desktop layouts where the sidebar is hidden.
    pub desktop_min_width: f32,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            desktop_min_width: 991.0,
        }
    }
}

/// Why the sidebar closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Overlay,
    CloseButton,
    Escape,
    Resize,
    Toggle,
}

/// Open/closed state plus the side effects the host applies: the overlay
/// shares the sidebar's visibility and body scrolling is locked while open.
#[derive(Debug, Clone, Default)]
pub struct SidebarMenu {
    config: SidebarConfig,
    open: bool,
}

impl SidebarMenu {
    pub fn new(config: SidebarConfig) -> Self {
        Self {
            config,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn overlay_visible(&self) -> bool {
        self.open
    }

    pub fn body_scroll_locked(&self) -> bool {
        self.open
    }

    /// Returns true when the state changed.
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        tracing::debug!("sidebar opened");
        true
    }

    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        tracing::debug!(?reason, "sidebar closed");
        true
    }

    pub fn toggle(&mut self) -> bool {
        if self.open {
            self.close(CloseReason::Toggle)
        } else {
            self.open()
        }
    }

    /// Document keydown. Only Escape matters.
    pub fn key(&mut self, key: &str) -> bool {
        key == "Escape" && self.close(CloseReason::Escape)
    }

    /// Window resized to `viewport_width`.
    pub fn resize(&mut self, viewport_width: f32) -> bool {
        viewport_width > self.config.desktop_min_width && self.close(CloseReason::Resize)
    }
}
