//! A mounted carousel instance: position, gestures, autoplay and resize
//! handling behind one owner with an explicit teardown.

use web_time::Instant;

use super::autoplay::{AutoplayTimer, PauseReason};
use super::config::CarouselConfig;
use super::gesture::{DragBounds, DragFrame, GestureOutcome, GestureRecognizer};
use super::indicator::{indicators, Indicator};
use super::position::{CarouselState, Direction, NavState};
use crate::debounce::Debouncer;

/// Measurements the host takes from the rendered markup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    /// Width of the element that clips the track.
    pub container_width: f32,
    /// Width of the first rendered item, when it can be measured.
    pub item_width: Option<f32>,
    /// Window inner width, used to gate mouse drags on mobile layouts.
    pub viewport_width: f32,
}

impl Measurements {
    pub fn new(container_width: f32, viewport_width: f32) -> Self {
        Self {
            container_width,
            item_width: None,
            viewport_width,
        }
    }

    pub fn with_item_width(mut self, item_width: f32) -> Self {
        self.item_width = Some(item_width);
        self
    }
}

/// Input device that started a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Touch,
    Mouse,
}

/// Keys the carousel reacts to while it or a descendant has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(NavKey::ArrowLeft),
            "ArrowRight" => Some(NavKey::ArrowRight),
            "Home" => Some(NavKey::Home),
            "End" => Some(NavKey::End),
            _ => None,
        }
    }
}

/// Everything the host needs to paint the carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    pub current_index: usize,
    pub max_index: usize,
    pub items_per_view: usize,
    /// Horizontal track translation in pixels (`translateX`).
    pub offset_px: f32,
    /// False while a drag is following the pointer; CSS transitions should be off.
    pub animate: bool,
    pub nav: NavState,
    pub indicators: Vec<Indicator>,
}

/// A mounted carousel.
///
/// Hosts forward DOM events to the matching methods, call [`tick`](Carousel::tick)
/// from their timer callback, and repaint from [`view`](Carousel::view) whenever
/// a method reports a change.
#[derive(Debug, Clone)]
pub struct Carousel {
    config: CarouselConfig,
    state: CarouselState,
    gesture: GestureRecognizer,
    autoplay: Option<AutoplayTimer>,
    resize: Debouncer<Measurements>,
    viewport_width: f32,
    drag_offset: Option<f32>,
    torn_down: bool,
}

impl Carousel {
    /// Mount over `item_count` items. Returns `None` when there is nothing to
    /// show, which leaves the markup static.
    pub fn mount(
        config: CarouselConfig,
        item_count: usize,
        measurements: Measurements,
        now: Instant,
    ) -> Option<Self> {
        if item_count == 0 {
            tracing::debug!("carousel has no items, staying inert");
            return None;
        }

        let metrics = config
            .sizing
            .resolve(measurements.container_width, measurements.item_width);
        let state = CarouselState::new(item_count, metrics);
        let gesture = GestureRecognizer::new(config.gesture.clone());
        let autoplay = config.autoplay_interval().map(AutoplayTimer::new);
        let resize = Debouncer::from_millis(config.resize_debounce_ms);

        let mut carousel = Self {
            config,
            state,
            gesture,
            autoplay,
            resize,
            viewport_width: measurements.viewport_width,
            drag_offset: None,
            torn_down: false,
        };
        carousel.sync_autoplay(now);

        tracing::info!(
            items = item_count,
            items_per_view = carousel.state.items_per_view(),
            max_index = carousel.state.max_index(),
            autoplay = carousel.autoplay_running(),
            "carousel mounted"
        );
        Some(carousel)
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn autoplay_running(&self) -> bool {
        self.autoplay
            .as_ref()
            .map(|timer| timer.is_running())
            .unwrap_or(false)
    }

    pub fn view(&self) -> CarouselView {
        CarouselView {
            current_index: self.state.current_index(),
            max_index: self.state.max_index(),
            items_per_view: self.state.items_per_view(),
            offset_px: self.drag_offset.unwrap_or_else(|| self.state.offset_px()),
            animate: self.drag_offset.is_none(),
            nav: self.state.nav_state(self.config.wrap),
            indicators: indicators(
                self.config.indicators,
                self.state.current_index(),
                self.state.items_per_view(),
                self.state.item_count(),
            ),
        }
    }

    /// Earliest instant at which [`tick`](Carousel::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let autoplay = self.autoplay.as_ref().and_then(|t| t.next_due());
        match (autoplay, self.resize.deadline()) {
            (Some(a), Some(r)) => Some(a.min(r)),
            (a, r) => a.or(r),
        }
    }

    // --- Navigation --------------------------------------------------------

    pub fn next(&mut self, now: Instant) -> bool {
        self.step(Direction::Next, now)
    }

    pub fn previous(&mut self, now: Instant) -> bool {
        self.step(Direction::Previous, now)
    }

    /// Jump to an index (indicator click); clamped.
    pub fn go_to(&mut self, index: usize, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        let changed = self.state.go_to(index);
        self.after_manual_navigation(now);
        changed
    }

    pub fn key(&mut self, key: NavKey, now: Instant) -> bool {
        match key {
            NavKey::ArrowLeft => self.previous(now),
            NavKey::ArrowRight => self.next(now),
            NavKey::Home => self.go_to(0, now),
            NavKey::End => self.go_to(self.state.max_index(), now),
        }
    }

    fn step(&mut self, direction: Direction, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        let changed = self.state.step(direction, self.config.wrap);
        self.after_manual_navigation(now);
        changed
    }

    fn after_manual_navigation(&mut self, now: Instant) {
        if let Some(timer) = self.autoplay.as_mut() {
            timer.restart(now);
        }
    }

    // --- Pointer gestures --------------------------------------------------

    /// Touch start / mouse down on the track.
    pub fn pointer_down(&mut self, kind: PointerKind, x: f32, y: f32, now: Instant) {
        if self.torn_down || !self.accepts(kind) {
            return;
        }
        self.gesture.begin(x, y, now);
        if let Some(timer) = self.autoplay.as_mut() {
            timer.set_paused(PauseReason::Drag, true, now);
        }
    }

    /// Pointer moved. Returns the live frame while a horizontal drag is active.
    pub fn pointer_move(&mut self, x: f32, y: f32, now: Instant) -> Option<DragFrame> {
        if self.torn_down {
            return None;
        }
        let bounds = DragBounds {
            base_offset_px: self.state.offset_px(),
            min_offset_px: self.state.min_offset_px(),
            max_offset_px: 0.0,
        };
        let frame = self.gesture.update(x, y, bounds);
        match frame {
            Some(frame) => self.drag_offset = Some(frame.offset_px),
            None => {
                // Vertical intent took over; put the track back and let autoplay go.
                self.drag_offset = None;
                self.release_drag_pause(now);
            }
        }
        frame
    }

    /// Touch end / mouse up / pointer leaving the track.
    pub fn pointer_up(&mut self, now: Instant) -> Option<GestureOutcome> {
        if self.torn_down {
            return None;
        }
        let outcome = self.gesture.end(now);
        self.drag_offset = None;
        self.release_drag_pause(now);

        if let Some(GestureOutcome::Commit(direction)) = outcome {
            let moved = self.state.step(direction, self.config.wrap);
            tracing::debug!(?direction, moved, index = self.state.current_index(), "swipe committed");
            self.after_manual_navigation(now);
        }
        outcome
    }

    fn accepts(&self, kind: PointerKind) -> bool {
        match kind {
            PointerKind::Touch => true,
            PointerKind::Mouse => {
                !self.config.mouse_drag_mobile_only
                    || self.viewport_width <= self.config.mobile_max_width
            }
        }
    }

    fn release_drag_pause(&mut self, now: Instant) {
        if let Some(timer) = self.autoplay.as_mut() {
            timer.set_paused(PauseReason::Drag, false, now);
        }
    }

    // --- Autoplay pauses ---------------------------------------------------

    pub fn set_hovered(&mut self, hovered: bool, now: Instant) {
        self.set_paused(PauseReason::Hover, hovered, now);
    }

    pub fn set_focused(&mut self, focused: bool, now: Instant) {
        self.set_paused(PauseReason::Focus, focused, now);
    }

    /// Visibility as reported by an intersection observer. Hosts without one
    /// never call this and the carousel is treated as visible.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        self.set_paused(PauseReason::Offscreen, !visible, now);
    }

    fn set_paused(&mut self, reason: PauseReason, paused: bool, now: Instant) {
        if self.torn_down {
            return;
        }
        if let Some(timer) = self.autoplay.as_mut() {
            timer.set_paused(reason, paused, now);
        }
    }

    // --- Resize ------------------------------------------------------------

    /// Window resized: remember the latest measurements and recompute once
    /// they have been stable for the debounce period.
    pub fn schedule_resize(&mut self, measurements: Measurements, now: Instant) {
        if self.torn_down {
            return;
        }
        self.resize.trigger(measurements, now);
    }

    /// Recompute metrics immediately and pull the index back into range.
    pub fn resize(&mut self, measurements: Measurements, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        let before = self.view();
        let metrics = self
            .config
            .sizing
            .resolve(measurements.container_width, measurements.item_width);
        self.viewport_width = measurements.viewport_width;
        self.state.apply_metrics(metrics);
        self.sync_autoplay(now);
        self.view() != before
    }

    pub fn set_item_count(&mut self, item_count: usize, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        let before = self.state.clone();
        self.state.set_item_count(item_count);
        self.sync_autoplay(now);
        self.state != before
    }

    // Autoplay only makes sense when there is something off-screen.
    fn sync_autoplay(&mut self, now: Instant) {
        let scrollable = self.state.item_count() > self.state.items_per_view();
        if let Some(timer) = self.autoplay.as_mut() {
            if scrollable && !timer.is_running() {
                timer.start(now);
            } else if !scrollable && timer.is_running() {
                timer.stop();
            }
        }
    }

    // --- Timers ------------------------------------------------------------

    /// Run due timers. Returns true when the view changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        let mut changed = false;

        if let Some(measurements) = self.resize.poll(now) {
            changed |= self.resize(measurements, now);
        }

        let due = self
            .autoplay
            .as_mut()
            .map(|timer| timer.poll(now))
            .unwrap_or(false);
        if due {
            let wrapped = self.state.current_index() >= self.state.max_index();
            changed |= self.state.advance_wrapping();
            if wrapped {
                tracing::debug!("autoplay wrapped to start");
            }
        }

        changed
    }

    /// Stop timers and drop any drag. Every later call is a no-op.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        if let Some(timer) = self.autoplay.as_mut() {
            timer.stop();
        }
        self.resize.cancel();
        self.gesture.cancel();
        self.drag_offset = None;
        self.torn_down = true;
        tracing::info!("carousel torn down");
    }
}
