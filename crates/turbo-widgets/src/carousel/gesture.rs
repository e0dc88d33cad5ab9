//! Swipe recognition for carousel tracks.
//!
//! States: idle → dragging → (commit | snap back) → idle.
//!
//! A pointer-down opens a drag session. Moves report a live track offset with
//! rubber-band resistance past either end, and latch the gesture axis on the
//! first decisive movement: a vertical latch abandons the session so the page
//! can scroll, a horizontal latch asks the host to suppress native scrolling
//! until release. Release turns total displacement and speed into a single
//! commit or a snap back.

use serde::{Deserialize, Serialize};
use web_time::Instant;

use super::position::Direction;

/// Swipe thresholds and drag feel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Releases faster than this (px/ms) count as flicks.
    pub fast_velocity_px_per_ms: f32,
    /// Minimum displacement for a flick to commit.
    pub fast_distance_px: f32,
    /// Minimum displacement for a slow drag to commit.
    pub slow_distance_px: f32,
    /// Fraction of the overshoot shown when dragging past an end.
    pub resistance: f32,
    /// Movement needed before the gesture axis latches.
    pub axis_lock_slop_px: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            fast_velocity_px_per_ms: 0.5,
            fast_distance_px: 30.0,
            slow_distance_px: 80.0,
            resistance: 0.3,
            axis_lock_slop_px: 5.0,
        }
    }
}

impl GestureConfig {
    /// Decide what a release with the given displacement and duration does.
    ///
    /// Elapsed time is floored at 1ms so an instantaneous release still has a
    /// finite speed.
    pub fn classify(&self, displacement_px: f32, elapsed_ms: f32) -> GestureOutcome {
        let distance = displacement_px.abs();
        let velocity = distance / elapsed_ms.max(1.0);
        let threshold = if velocity > self.fast_velocity_px_per_ms {
            self.fast_distance_px
        } else {
            self.slow_distance_px
        };

        if distance > 0.0 && distance >= threshold {
            // Finger travelling left pulls the next items into view.
            let direction = if displacement_px < 0.0 {
                Direction::Next
            } else {
                Direction::Previous
            };
            GestureOutcome::Commit(direction)
        } else {
            GestureOutcome::SnapBack
        }
    }
}

/// Result of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Commit(Direction),
    SnapBack,
}

/// Which axis the gesture belongs to, once decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisLock {
    Undecided,
    Horizontal,
    Vertical,
}

/// Offsets the live drag is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBounds {
    /// Offset of the committed position when the drag started.
    pub base_offset_px: f32,
    /// Most negative resting offset (last position).
    pub min_offset_px: f32,
    /// Least negative resting offset (first position), normally 0.
    pub max_offset_px: f32,
}

/// Live feedback while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    /// Track offset to render, resistance applied.
    pub offset_px: f32,
    /// Host should call `preventDefault` to keep the page from scrolling.
    pub suppress_scroll: bool,
}

#[derive(Debug, Clone)]
struct DragSession {
    start_x: f32,
    start_y: f32,
    started_at: Instant,
    last_x: f32,
    axis: AxisLock,
}

/// Converts pointer sequences into commit/snap-back decisions.
#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    session: Option<DragSession>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn axis(&self) -> Option<AxisLock> {
        self.session.as_ref().map(|s| s.axis)
    }

    /// Pointer or touch went down. Any unfinished session is discarded.
    pub fn begin(&mut self, x: f32, y: f32, now: Instant) {
        self.session = Some(DragSession {
            start_x: x,
            start_y: y,
            started_at: now,
            last_x: x,
            axis: AxisLock::Undecided,
        });
    }

    /// Pointer moved. Returns `None` when no horizontal drag is in progress.
    pub fn update(&mut self, x: f32, y: f32, bounds: DragBounds) -> Option<DragFrame> {
        let slop = self.config.axis_lock_slop_px;
        let session = self.session.as_mut()?;
        let dx = x - session.start_x;
        let dy = y - session.start_y;

        if session.axis == AxisLock::Undecided && dx.abs().max(dy.abs()) > slop {
            session.axis = if dx.abs() > dy.abs() {
                AxisLock::Horizontal
            } else {
                AxisLock::Vertical
            };
        }

        if session.axis == AxisLock::Vertical {
            tracing::trace!("vertical intent, releasing drag to page scroll");
            self.session = None;
            return None;
        }

        session.last_x = x;
        let suppress_scroll = session.axis == AxisLock::Horizontal;
        Some(DragFrame {
            offset_px: self.rubber_band(bounds.base_offset_px + dx, bounds),
            suppress_scroll,
        })
    }

    /// Pointer released. Returns `None` when there was no active session.
    /// Only a drag latched to the horizontal axis can commit.
    pub fn end(&mut self, now: Instant) -> Option<GestureOutcome> {
        let session = self.session.take()?;
        if session.axis != AxisLock::Horizontal {
            return Some(GestureOutcome::SnapBack);
        }
        let displacement = session.last_x - session.start_x;
        let elapsed_ms = now
            .saturating_duration_since(session.started_at)
            .as_secs_f32()
            * 1000.0;
        Some(self.config.classify(displacement, elapsed_ms))
    }

    /// Drop the session without deciding anything (focus loss, teardown).
    pub fn cancel(&mut self) {
        self.session = None;
    }

    fn rubber_band(&self, raw: f32, bounds: DragBounds) -> f32 {
        let r = self.config.resistance;
        if raw > bounds.max_offset_px {
            bounds.max_offset_px + (raw - bounds.max_offset_px) * r
        } else if raw < bounds.min_offset_px {
            bounds.min_offset_px + (raw - bounds.min_offset_px) * r
        } else {
            raw
        }
    }
}
