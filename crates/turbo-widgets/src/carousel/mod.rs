//! Carousel module.
//!
//! Contains the viewport resolver, position controller, gesture recognizer,
//! autoplay timer and indicator projection, plus the mounted [`Carousel`]
//! that ties them together.

mod autoplay;
mod config;
mod controller;
mod gesture;
mod indicator;
mod position;
mod viewport;

pub use autoplay::{AutoplayTimer, PauseReason};
pub use config::{CarouselConfig, MOBILE_MAX_WIDTH};
pub use controller::{Carousel, CarouselView, Measurements, NavKey, PointerKind};
pub use gesture::{
    AxisLock, DragBounds, DragFrame, GestureConfig, GestureOutcome, GestureRecognizer,
};
pub use indicator::{indicators, page_count, Indicator, IndicatorMode};
pub use position::{CarouselState, Direction, NavState, WrapPolicy};
pub use viewport::{Breakpoint, BreakpointTable, Sizing, ViewportMetrics};
