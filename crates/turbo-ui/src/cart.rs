//! Add-to-cart form, quantity input and cart badge.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use turbo_data::{BrowserTransport, FetchClient};
use turbo_widgets::cart::{
    apply_outcome, clamp_quantity_input, fetch_cart_count, send_add_to_cart, AddToCartForm,
    CartEffects, SubmitControl, CSRF_FIELD,
};
use turbo_widgets::notify::NotificationKind;
use web_time::Instant;

use crate::context::{use_storefront, Storefront};

const DEFAULT_LABEL: &str = r#"<i class="fas fa-cart-plus"></i> Add to Cart"#;

/// Ask the backend for the current item count and update the badge.
pub fn refresh_cart_count(storefront: Storefront) {
    let config = storefront.config.with_value(|c| c.cart.clone());
    spawn_local(async move {
        let client = FetchClient::new(BrowserTransport);
        match fetch_cart_count(&client, &config).await {
            Ok(count) => storefront.cart_count.set(Some(count)),
            Err(e) => tracing::warn!(error = %e, "cart count refresh failed"),
        }
    });
}

/// Product form that posts in the background and reports through a toast.
#[component]
pub fn AddToCartButton(
    #[prop(into)] action: String,
    #[prop(into)] csrf_token: String,
    #[prop(default = 1)] min_quantity: i64,
    #[prop(default = 99)] max_quantity: i64,
    #[prop(into, optional)] label_html: Option<String>,
) -> impl IntoView {
    let storefront = use_storefront();
    let control = RwSignal::new(SubmitControl::new(
        label_html.unwrap_or_else(|| DEFAULT_LABEL.to_string()),
    ));
    let quantity = RwSignal::new(min_quantity);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if !control.try_update(SubmitControl::begin).unwrap_or(false) {
            return;
        }
        let form = AddToCartForm::new(action.clone())
            .field(CSRF_FIELD, csrf_token.clone())
            .field("quantity", quantity.get_untracked().to_string());

        spawn_local(async move {
            let client = FetchClient::new(BrowserTransport);
            let outcome = send_add_to_cart(&client, &form).await;
            let config = storefront.config.with_value(|c| c.cart.clone());

            let mut effects = CartEffects::default();
            control.update(|control| {
                storefront.notices.update(|notices| {
                    effects = apply_outcome(&outcome, control, notices, &config, Instant::now());
                });
            });

            if effects.refresh_count {
                refresh_cart_count(storefront);
            }
            if let Some(at) = effects.reload_at {
                set_timeout(
                    || {
                        if let Err(e) = window().location().reload() {
                            tracing::warn!(error = ?e, "page reload after add to cart failed");
                        }
                    },
                    at.saturating_duration_since(Instant::now()),
                );
            }
        });
    };

    view! {
        <form class="add-to-cart-form" on:submit=on_submit>
            <QuantityInput value=quantity min=min_quantity max=max_quantity/>
            <button
                type="submit"
                class=move || {
                    control.with(|c| match c.added_class() {
                        Some(added) => format!("btn btn-primary {}", added),
                        None => "btn btn-primary".to_string(),
                    })
                }
                disabled=move || control.with(SubmitControl::disabled)
                inner_html=move || control.with(|c| c.inner_html().to_string())
            ></button>
        </form>
    }
}

/// Number input clamped to `[min, max]`; exceeding `max` raises a warning toast.
#[component]
pub fn QuantityInput(value: RwSignal<i64>, min: i64, max: i64) -> impl IntoView {
    let notices = use_storefront().notices;

    view! {
        <input
            type="number"
            name="quantity"
            class="form-control quantity-input"
            min=min
            max=max
            prop:value=move || value.get().to_string()
            on:change=move |ev| {
                if let Some(adjusted) = clamp_quantity_input(&event_target_value(&ev), min, max) {
                    value.set(adjusted.value);
                    if let Some(warning) = adjusted.warning {
                        notices.update(|n| n.show(NotificationKind::Warning, warning, Instant::now()));
                    }
                }
            }
        />
    }
}

/// Header badge showing the number of items in the cart.
#[component]
pub fn CartBadge(#[prop(optional)] initial: Option<u64>) -> impl IntoView {
    let count = use_storefront().cart_count;
    if initial.is_some() {
        count.set(initial);
    }

    view! {
        <span class="badge cart-count cart-badge">
            {move || count.get().map(|n| n.to_string()).unwrap_or_default()}
        </span>
    }
}
