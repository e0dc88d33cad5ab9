//! Shared storefront state and the timer plumbing every widget uses.

use leptos::prelude::*;
use turbo_widgets::notify::NotificationCenter;
use turbo_widgets::StorefrontConfig;
use web_time::{Duration, Instant};

/// Poll period for widget deadlines.
pub const TICK: Duration = Duration::from_millis(50);

/// Context shared by all widget components on a page.
#[derive(Clone, Copy)]
pub struct Storefront {
    pub config: StoredValue<StorefrontConfig>,
    pub notices: RwSignal<NotificationCenter>,
    pub cart_count: RwSignal<Option<u64>>,
}

/// Install the storefront context for the current subtree.
pub fn provide_storefront(config: StorefrontConfig) -> Storefront {
    let storefront = Storefront {
        notices: RwSignal::new(NotificationCenter::new(&config.notifications)),
        config: StoredValue::new(config),
        cart_count: RwSignal::new(None),
    };
    provide_context(storefront);
    storefront
}

/// The surrounding storefront context, or a default one.
pub fn use_storefront() -> Storefront {
    use_context::<Storefront>().unwrap_or_else(|| provide_storefront(StorefrontConfig::default()))
}

/// Run `tick` every [`TICK`] until the owning component unmounts.
pub fn use_ticker(tick: impl Fn(Instant) + 'static) {
    let handle = set_interval_with_handle(move || tick(Instant::now()), TICK).ok();
    on_cleanup(move || {
        if let Some(handle) = handle {
            handle.clear();
        }
    });
}

pub(crate) fn viewport_width() -> f32 {
    window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0) as f32
}
