//! Leptos components for the TurboCommerce storefront widgets.
//!
//! Each component owns one headless widget from `turbo-widgets` in a signal,
//! forwards DOM events into it and renders its view. Timers are polled through
//! [`context::use_ticker`].

mod app;
pub mod carousel;
pub mod cart;
pub mod context;
pub mod menu;
pub mod search;
pub mod toast;

pub use app::{App, SiteHeader};
pub use carousel::{CategoryCard, CategoryCarousel};
pub use cart::{refresh_cart_count, AddToCartButton, CartBadge, QuantityInput};
pub use context::{provide_storefront, use_storefront, Storefront};
pub use menu::{CategoryNav, CategorySidebar};
pub use search::SearchBar;
pub use toast::ToastHost;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
