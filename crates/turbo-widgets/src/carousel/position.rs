//! Carousel position: the clamped index and the track offset derived from it.

use serde::{Deserialize, Serialize};

use super::viewport::ViewportMetrics;

/// What manual navigation does at either end of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapPolicy {
    /// Stop at the ends; further steps are no-ops.
    #[default]
    Clamp,
    /// Jump to the opposite end.
    Wrap,
}

/// Direction of a single navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Enabled state of the previous/next buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

/// Carousel position state.
///
/// `current_index` always lies in `0..=max_index()`, where
/// `max_index = item_count.saturating_sub(items_per_view)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    current_index: usize,
    item_count: usize,
    items_per_view: usize,
    item_extent_px: f32,
}

impl CarouselState {
    pub fn new(item_count: usize, metrics: ViewportMetrics) -> Self {
        Self {
            current_index: 0,
            item_count,
            items_per_view: metrics.items_per_view.max(1),
            item_extent_px: metrics.item_extent_px.max(0.0),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn items_per_view(&self) -> usize {
        self.items_per_view
    }

    pub fn item_extent_px(&self) -> f32 {
        self.item_extent_px
    }

    pub fn max_index(&self) -> usize {
        self.item_count.saturating_sub(self.items_per_view)
    }

    /// Track translation for the committed index.
    pub fn offset_px(&self) -> f32 {
        self.offset_for(self.current_index)
    }

    pub fn offset_for(&self, index: usize) -> f32 {
        -(index as f32 * self.item_extent_px)
    }

    /// Most negative offset the track may rest at.
    pub fn min_offset_px(&self) -> f32 {
        self.offset_for(self.max_index())
    }

    /// Move to `index`, clamped into range. Returns whether the index changed.
    pub fn go_to(&mut self, index: usize) -> bool {
        let clamped = index.min(self.max_index());
        let changed = clamped != self.current_index;
        self.current_index = clamped;
        changed
    }

    /// One step forward; a no-op at the end.
    pub fn next(&mut self) -> bool {
        self.step(Direction::Next, WrapPolicy::Clamp)
    }

    /// One step back; a no-op at the start.
    pub fn previous(&mut self) -> bool {
        self.step(Direction::Previous, WrapPolicy::Clamp)
    }

    pub fn step(&mut self, direction: Direction, policy: WrapPolicy) -> bool {
        let max = self.max_index();
        let target = match (direction, policy) {
            (Direction::Next, _) if self.current_index < max => self.current_index + 1,
            (Direction::Next, WrapPolicy::Wrap) => 0,
            (Direction::Next, WrapPolicy::Clamp) => max,
            (Direction::Previous, _) if self.current_index > 0 => self.current_index - 1,
            (Direction::Previous, WrapPolicy::Wrap) => max,
            (Direction::Previous, WrapPolicy::Clamp) => 0,
        };
        self.go_to(target)
    }

    /// Autoplay advance: like `next`, but restarts from 0 after the last position.
    pub fn advance_wrapping(&mut self) -> bool {
        if self.current_index >= self.max_index() {
            self.go_to(0)
        } else {
            self.go_to(self.current_index + 1)
        }
    }

    /// Apply new viewport metrics and pull the index back into range.
    pub fn apply_metrics(&mut self, metrics: ViewportMetrics) {
        self.items_per_view = metrics.items_per_view.max(1);
        self.item_extent_px = metrics.item_extent_px.max(0.0);
        self.current_index = self.current_index.min(self.max_index());
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.current_index = self.current_index.min(self.max_index());
    }

    /// Button state. With wrapping navigation neither button is ever disabled.
    pub fn nav_state(&self, policy: WrapPolicy) -> NavState {
        match policy {
            WrapPolicy::Clamp => NavState {
                prev_disabled: self.current_index == 0,
                next_disabled: self.current_index >= self.max_index(),
            },
            WrapPolicy::Wrap => NavState {
                prev_disabled: self.max_index() == 0,
                next_disabled: self.max_index() == 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state(item_count: usize, items_per_view: usize) -> CarouselState {
        CarouselState::new(
            item_count,
            ViewportMetrics {
                items_per_view,
                item_extent_px: 215.0,
            },
        )
    }

    #[test]
    fn test_go_to_clamps_and_offsets() {
        let mut s = state(10, 4);
        assert_eq!(s.max_index(), 6);

        assert!(s.go_to(99));
        assert_eq!(s.current_index(), 6);
        assert_eq!(s.offset_px(), -(6.0 * 215.0));
        assert_eq!(s.nav_state(WrapPolicy::Clamp), NavState { prev_disabled: false, next_disabled: true });

        assert!(s.go_to(0));
        assert_eq!(s.offset_px(), 0.0);
        assert!(s.nav_state(WrapPolicy::Clamp).prev_disabled);
    }

    #[test]
    fn test_manual_next_does_not_wrap() {
        let mut s = state(10, 4);
        s.go_to(6);
        assert!(!s.next());
        assert!(!s.next());
        assert_eq!(s.current_index(), 6);
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut s = state(10, 4);
        assert!(!s.previous());
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_autoplay_advance_wraps_to_start() {
        let mut s = state(10, 4);
        s.go_to(6);
        assert!(s.advance_wrapping());
        assert_eq!(s.current_index(), 0);
        assert!(s.advance_wrapping());
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn test_wrap_policy_for_manual_steps() {
        let mut s = state(10, 4);
        assert!(s.step(Direction::Previous, WrapPolicy::Wrap));
        assert_eq!(s.current_index(), 6);
        assert!(s.step(Direction::Next, WrapPolicy::Wrap));
        assert_eq!(s.current_index(), 0);
        let nav = s.nav_state(WrapPolicy::Wrap);
        assert!(!nav.prev_disabled && !nav.next_disabled);
    }

    #[test]
    fn test_fewer_items_than_view() {
        let mut s = state(3, 4);
        assert_eq!(s.max_index(), 0);
        assert!(!s.next());
        assert!(!s.advance_wrapping());
        let nav = s.nav_state(WrapPolicy::Clamp);
        assert!(nav.prev_disabled && nav.next_disabled);
    }

    #[test]
    fn test_resize_reclamps_index() {
        let mut s = state(8, 3);
        s.go_to(5);
        assert_eq!(s.current_index(), 5);

        s.apply_metrics(ViewportMetrics {
            items_per_view: 5,
            item_extent_px: 180.0,
        });
        assert_eq!(s.max_index(), 3);
        assert_eq!(s.current_index(), 3);
        assert_eq!(s.offset_px(), -540.0);
    }

    #[test]
    fn test_empty_carousel() {
        let mut s = state(0, 4);
        assert_eq!(s.max_index(), 0);
        assert!(!s.go_to(3));
        assert_eq!(s.current_index(), 0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        GoTo(usize),
        Next,
        Previous,
        Advance,
        Wrap(bool),
        Resize(usize),
        Count(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..40).prop_map(Op::GoTo),
            Just(Op::Next),
            Just(Op::Previous),
            Just(Op::Advance),
            any::<bool>().prop_map(Op::Wrap),
            (0usize..12).prop_map(Op::Resize),
            (0usize..30).prop_map(Op::Count),
        ]
    }

    proptest! {
        #[test]
        fn prop_index_stays_in_bounds(
            item_count in 0usize..30,
            items_per_view in 0usize..12,
            ops in proptest::collection::vec(op(), 0..64),
        ) {
            let mut s = state(item_count, items_per_view);
            for op in ops {
                match op {
                    Op::GoTo(i) => { s.go_to(i); }
                    Op::Next => { s.next(); }
                    Op::Previous => { s.previous(); }
                    Op::Advance => { s.advance_wrapping(); }
                    Op::Wrap(forward) => {
                        let d = if forward { Direction::Next } else { Direction::Previous };
                        s.step(d, WrapPolicy::Wrap);
                    }
                    Op::Resize(ipv) => s.apply_metrics(ViewportMetrics { items_per_view: ipv, item_extent_px: 100.0 }),
                    Op::Count(n) => s.set_item_count(n),
                }
                prop_assert!(s.items_per_view() >= 1);
                prop_assert!(s.current_index() <= s.item_count().saturating_sub(s.items_per_view()));
            }
        }

        #[test]
        fn prop_repeated_next_at_end_is_idempotent(item_count in 0usize..30, items_per_view in 1usize..8, extra in 1usize..10) {
            let mut s = state(item_count, items_per_view);
            s.go_to(usize::MAX);
            let end = s.current_index();
            for _ in 0..extra {
                prop_assert!(!s.next());
            }
            prop_assert_eq!(s.current_index(), end);
        }
    }
}
