//! Demo storefront page wiring every widget together.

use leptos::ev;
use leptos::prelude::*;
use turbo_widgets::header::StickyHeader;
use turbo_widgets::StorefrontConfig;

use crate::carousel::{CategoryCard, CategoryCarousel};
use crate::cart::{refresh_cart_count, CartBadge};
use crate::context::{provide_storefront, use_storefront};
use crate::menu::CategorySidebar;
use crate::search::SearchBar;
use crate::toast::ToastHost;

const EMBEDDED_CONFIG: &str = include_str!("../storefront.toml");

fn embedded_config() -> StorefrontConfig {
    StorefrontConfig::from_toml_str(EMBEDDED_CONFIG).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "embedded storefront config rejected, using defaults");
        StorefrontConfig::default()
    })
}

/// Header that gains the `scrolled` class past the configured offset.
#[component]
pub fn SiteHeader(children: Children) -> impl IntoView {
    let config = use_storefront().config.with_value(|c| c.header.clone());
    let header = StoredValue::new(StickyHeader::new(config));
    let scrolled = RwSignal::new(false);

    let listener = window_event_listener(ev::scroll, move |_| {
        let offset = window().scroll_y().unwrap_or(0.0) as f32;
        let changed = header.try_update_value(|h| h.on_scroll(offset)).unwrap_or(false);
        if changed {
            scrolled.set(header.with_value(StickyHeader::scrolled));
        }
    });
    on_cleanup(move || listener.remove());

    view! {
        <header class=move || if scrolled.get() { "main-header scrolled" } else { "main-header" }>
            {children()}
        </header>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let storefront = provide_storefront(embedded_config());
    let categories = storefront.config.with_value(|c| c.categories.clone());
    let cards: Vec<CategoryCard> = categories.iter().map(CategoryCard::from).collect();

    Effect::new(move |_| refresh_cart_count(storefront));

    view! {
        <SiteHeader>
            <nav class="navbar">
                <a class="navbar-brand" href="/">"TurboCommerce"</a>
                <CategorySidebar entries=categories/>
                <SearchBar/>
                <a class="cart-link" href="/cart/">
                    <i class="fas fa-shopping-cart"></i>
                    <CartBadge/>
                </a>
            </nav>
        </SiteHeader>
        <main>
            <section class="d-none d-md-block">
                <CategoryCarousel preset="category_strip" items=cards.clone() label="Shop by category"/>
            </section>
            <section class="d-md-none">
                <CategoryCarousel preset="mobile_categories" items=cards/>
            </section>
        </main>
        <ToastHost/>
    }
}
