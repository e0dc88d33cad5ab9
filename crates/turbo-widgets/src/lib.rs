//! Headless storefront widgets for TurboCommerce.
//!
//! Every widget here is a plain state machine: the host (a Leptos component,
//! a test, a server-side renderer) forwards events together with the current
//! [`Instant`](web_time::Instant) and reads back what to render. Nothing owns a
//! timer; hosts ask for the next deadline and call `tick` when it passes.
//!
//! - **Carousel**: viewport metrics, position, swipe gestures, autoplay, indicators
//! - **Menu**: expandable category tree and the mobile sidebar
//! - **Search**: debounced suggestions with keyboard selection
//! - **Cart**: add-to-cart submission, quantity bounds, cart count
//! - **Notifications** and the **sticky header**
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_widgets::prelude::*;
//! use web_time::Instant;
//!
//! let config = StorefrontConfig::from_toml_str(include_str!("storefront.toml"))?;
//! let strip = config.carousel("category_strip").cloned().unwrap_or_default();
//!
//! let now = Instant::now();
//! if let Some(mut carousel) = Carousel::mount(strip, 10, Measurements::new(860.0, 1280.0), now) {
//!     carousel.next(now);
//!     let view = carousel.view();
//!     render(view.offset_px, &view.indicators);
//! }
//! ```

pub mod error;

pub mod carousel;
pub mod cart;
pub mod config;
pub mod debounce;
pub mod header;
pub mod menu;
pub mod notify;
pub mod search;

pub use config::StorefrontConfig;
pub use error::WidgetError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StorefrontConfig;
    pub use crate::error::WidgetError;

    // Carousel
    pub use crate::carousel::{
        Carousel, CarouselConfig, CarouselView, Direction, GestureOutcome, IndicatorMode,
        Measurements, NavKey, PointerKind, Sizing, WrapPolicy,
    };

    // Menu
    pub use crate::menu::{CategoryEntry, CategoryId, CategoryMenu, MenuNodeState, SidebarMenu};

    // Search
    pub use crate::search::{KeyOutcome, SearchBox, SearchKey, StaticSuggestions, SuggestionSource};

    // Cart
    pub use crate::cart::{
        apply_outcome, clamp_quantity, fetch_cart_count, send_add_to_cart, AddToCartForm,
        CartOutcome, SubmitControl,
    };

    pub use crate::debounce::Debouncer;
    pub use crate::header::StickyHeader;
    pub use crate::notify::{Notification, NotificationCenter, NotificationKind};
}
