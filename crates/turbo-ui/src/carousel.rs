//! Category carousel component.

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use turbo_widgets::carousel::{Carousel, Measurements, NavKey, PointerKind};
use turbo_widgets::menu::CategoryEntry;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry};
use web_time::Instant;

use crate::context::{use_storefront, use_ticker, viewport_width};

/// One card in a category carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCard {
    pub name: String,
    pub href: String,
    pub image_url: Option<String>,
}

impl From<&CategoryEntry> for CategoryCard {
    fn from(entry: &CategoryEntry) -> Self {
        Self {
            name: entry.name.clone(),
            href: entry.href.clone(),
            image_url: None,
        }
    }
}

fn with_carousel(state: RwSignal<Option<Carousel>>, f: impl FnOnce(&mut Carousel, Instant)) {
    state.update(|slot| {
        if let Some(carousel) = slot.as_mut() {
            f(carousel, Instant::now());
        }
    });
}

/// Reports whether the carousel is on screen. Disconnects when dropped.
struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl VisibilityObserver {
    /// `None` when the browser has no `IntersectionObserver`; autoplay then
    /// ignores visibility.
    fn watch(target: &web_sys::Element, state: RwSignal<Option<Carousel>>) -> Option<Self> {
        let supported = js_sys::Reflect::has(&window(), &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false);
        if !supported {
            tracing::debug!("IntersectionObserver unavailable, carousel visibility not tracked");
            return None;
        }

        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    let visible = entry.is_intersecting();
                    with_carousel(state, |c, now| c.set_visible(visible, now));
                }
            }
        });
        let observer = match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(e) => {
                tracing::warn!(error = ?e, "could not create IntersectionObserver");
                return None;
            }
        };
        observer.observe(target);
        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn first_touch(ev: &ev::TouchEvent) -> Option<(f32, f32)> {
    ev.touches()
        .get(0)
        .map(|t| (t.client_x() as f32, t.client_y() as f32))
}

/// Horizontally scrolling row of category cards.
///
/// `preset` names an entry under `[carousels]` in the storefront config; an
/// unknown name falls back to the default strip.
#[component]
pub fn CategoryCarousel(
    #[prop(into)] preset: String,
    items: Vec<CategoryCard>,
    #[prop(into, optional)] label: Option<String>,
) -> impl IntoView {
    let config = use_storefront()
        .config
        .with_value(|c| c.carousel(&preset).cloned().unwrap_or_default());
    let item_count = items.len();
    let container = NodeRef::<html::Div>::new();
    let state = RwSignal::new(None::<Carousel>);
    let visibility = StoredValue::new_local(None::<VisibilityObserver>);

    let measure = move || {
        container.get_untracked().map(|el| {
            let measurements = Measurements::new(el.client_width() as f32, viewport_width());
            match el.query_selector(".carousel-item").ok().flatten() {
                Some(item) => measurements.with_item_width(item.get_bounding_client_rect().width() as f32),
                None => measurements,
            }
        })
    };

    // Mount once the container is in the DOM.
    Effect::new(move |_| {
        let Some(el) = container.get() else {
            return;
        };
        if state.with_untracked(Option::is_none) {
            if let Some(measurements) = measure() {
                state.set(Carousel::mount(config.clone(), item_count, measurements, Instant::now()));
            }
        }
        if state.with_untracked(Option::is_some) && visibility.with_value(Option::is_none) {
            let observer = VisibilityObserver::watch(&el, state);
            visibility.set_value(observer);
        }
    });

    use_ticker(move |now| {
        let due = state.with_untracked(|s| {
            s.as_ref()
                .and_then(Carousel::next_deadline)
                .is_some_and(|deadline| now >= deadline)
        });
        if due {
            with_carousel(state, |c, now| {
                c.tick(now);
            });
        }
    });

    let resize = window_event_listener(ev::resize, move |_| {
        if let Some(measurements) = measure() {
            state.update_untracked(|slot| {
                if let Some(c) = slot.as_mut() {
                    c.schedule_resize(measurements, Instant::now());
                }
            });
        }
    });

    on_cleanup(move || {
        resize.remove();
        visibility.try_update_value(Option::take);
        state.try_update(|slot| {
            if let Some(c) = slot.as_mut() {
                c.teardown();
            }
        });
    });

    let snapshot = Memo::new(move |_| state.with(|s| s.as_ref().map(Carousel::view)));
    let dragging = move || state.with_untracked(|s| s.as_ref().is_some_and(Carousel::is_dragging));

    let track_style = move || match snapshot.get() {
        Some(view) => format!(
            "transform: translateX({}px); transition: {};",
            view.offset_px,
            if view.animate { "transform 0.5s ease" } else { "none" }
        ),
        None => String::new(),
    };

    let indicators = move || {
        snapshot.get().map(|view| {
            view.indicators
                .into_iter()
                .enumerate()
                .map(|(i, dot)| {
                    view! {
                        <button
                            type="button"
                            class=if dot.active { "carousel-indicator active" } else { "carousel-indicator" }
                            aria-label=format!("Go to slide {}", i + 1)
                            on:click=move |_| with_carousel(state, |c, now| {
                                c.go_to(dot.target_index, now);
                            })
                        ></button>
                    }
                })
                .collect_view()
        })
    };

    let cards = items
        .into_iter()
        .map(|item| {
            let alt = item.name.clone();
            view! {
                <div class="carousel-item">
                    <a href=item.href class="category-card">
                        {item.image_url.map(|src| view! { <img src=src alt=alt loading="lazy"/> })}
                        <span class="category-name">{item.name}</span>
                    </a>
                </div>
            }
        })
        .collect_view();

    view! {
        <section
            class="category-carousel"
            tabindex="0"
            aria-roledescription="carousel"
            aria-label=label.unwrap_or_else(|| "Categories".to_string())
            on:keydown=move |ev: ev::KeyboardEvent| {
                if let Some(key) = NavKey::from_key(&ev.key()) {
                    ev.prevent_default();
                    with_carousel(state, |c, now| {
                        c.key(key, now);
                    });
                }
            }
            on:mouseenter=move |_| with_carousel(state, |c, now| c.set_hovered(true, now))
            on:mouseleave=move |_| with_carousel(state, |c, now| {
                c.pointer_up(now);
                c.set_hovered(false, now);
            })
            on:focusin=move |_| with_carousel(state, |c, now| c.set_focused(true, now))
            on:focusout=move |_| with_carousel(state, |c, now| c.set_focused(false, now))
        >
            <button
                type="button"
                class="carousel-control prev"
                aria-label="Previous"
                disabled=move || snapshot.get().map(|v| v.nav.prev_disabled).unwrap_or(true)
                on:click=move |_| with_carousel(state, |c, now| {
                    c.previous(now);
                })
            >
                <i class="fas fa-chevron-left"></i>
            </button>

            <div class="carousel-container" node_ref=container>
                <div
                    class="carousel-track"
                    style=track_style
                    on:touchstart=move |ev: ev::TouchEvent| {
                        if let Some((x, y)) = first_touch(&ev) {
                            with_carousel(state, |c, now| c.pointer_down(PointerKind::Touch, x, y, now));
                        }
                    }
                    on:touchmove=move |ev: ev::TouchEvent| {
                        if !dragging() {
                            return;
                        }
                        if let Some((x, y)) = first_touch(&ev) {
                            let mut suppress = false;
                            with_carousel(state, |c, now| {
                                suppress = c.pointer_move(x, y, now).is_some_and(|f| f.suppress_scroll);
                            });
                            if suppress {
                                ev.prevent_default();
                            }
                        }
                    }
                    on:touchend=move |_| with_carousel(state, |c, now| {
                        c.pointer_up(now);
                    })
                    on:mousedown=move |ev: ev::MouseEvent| {
                        let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
                        with_carousel(state, |c, now| c.pointer_down(PointerKind::Mouse, x, y, now));
                    }
                    on:mousemove=move |ev: ev::MouseEvent| {
                        if dragging() {
                            let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
                            with_carousel(state, |c, now| {
                                c.pointer_move(x, y, now);
                            });
                        }
                    }
                    on:mouseup=move |_| with_carousel(state, |c, now| {
                        c.pointer_up(now);
                    })
                >
                    {cards}
                </div>
            </div>

            <button
                type="button"
                class="carousel-control next"
                aria-label="Next"
                disabled=move || snapshot.get().map(|v| v.nav.next_disabled).unwrap_or(true)
                on:click=move |_| with_carousel(state, |c, now| {
                    c.next(now);
                })
            >
                <i class="fas fa-chevron-right"></i>
            </button>

            <div class="carousel-indicators">{indicators}</div>
        </section>
    }
}
