//! Category navigation components.

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use turbo_widgets::menu::{CategoryEntry, CategoryMenu, CloseReason, MenuItemView, SidebarMenu};
use wasm_bindgen::JsCast;
use web_time::Duration;

use crate::context::{use_storefront, viewport_width};

/// Matches the submenu height transition in the stylesheet.
const SUBMENU_TRANSITION: Duration = Duration::from_millis(300);

/// Expandable category tree. The entry matching the current location is
/// highlighted and its ancestors start open.
#[component]
pub fn CategoryNav(entries: Vec<CategoryEntry>) -> impl IntoView {
    let menu = CategoryMenu::new(entries).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "category menu disabled");
        CategoryMenu::default()
    });
    let menu = RwSignal::new(menu);
    let list = NodeRef::<html::Ul>::new();

    Effect::new(move |_| {
        if let Ok(path) = window().location().pathname() {
            menu.update(|m| {
                m.highlight_path(&path);
                m.auto_expand_active();
            });
        }
    });

    // Clicks anywhere outside the menu close every open submenu.
    let outside = window_event_listener(ev::click, move |ev| {
        let Some(list) = list.get_untracked() else {
            return;
        };
        let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        // A row re-rendered by its own click is no longer in the document.
        let detached = target.as_ref().is_some_and(|node| !node.is_connected());
        if !detached && !list.contains(target.as_ref()) {
            menu.update(CategoryMenu::collapse_all);
            settle_later(menu);
        }
    });
    on_cleanup(move || outside.remove());

    view! {
        <ul class="category-menu" node_ref=list>
            {move || {
                menu.with(CategoryMenu::visible_items)
                    .into_iter()
                    .map(|item| menu_row(item, menu))
                    .collect_view()
            }}
        </ul>
    }
}

/// Settle every running submenu animation once the CSS transition is over.
/// Nodes toggled again in the meantime keep their newer animation.
fn settle_later(menu: RwSignal<CategoryMenu>) {
    for (id, generation) in menu.with_untracked(CategoryMenu::transitioning) {
        set_timeout(
            move || {
                menu.update(|m| {
                    if let Err(e) = m.transition_end_at(&id, generation) {
                        tracing::warn!(error = %e, "submenu transition end failed");
                    }
                })
            },
            SUBMENU_TRANSITION,
        );
    }
}

fn menu_row(item: MenuItemView, menu: RwSignal<CategoryMenu>) -> impl IntoView {
    let class = if item.active { "category-item active" } else { "category-item" };
    let style = format!("padding-left: {}rem", 1 + item.depth);

    let toggle = item.has_children.then(|| {
        let id = item.id.clone();
        view! {
            <button
                type="button"
                class=format!("submenu-toggle {}", item.state.as_str())
                aria-expanded=item.state.aria_expanded().to_string()
                aria-label=format!("Toggle {}", item.name)
                on:click=move |ev| {
                    ev.prevent_default();
                    menu.update(|m| {
                        if let Err(e) = m.toggle_exclusive(&id) {
                            tracing::warn!(error = %e, "submenu toggle failed");
                        }
                    });
                    settle_later(menu);
                }
            >
                <i class="fas fa-chevron-down"></i>
            </button>
        }
    });

    view! {
        <li class=class style=style>
            <a href=item.href aria-current=item.active.then_some("page")>{item.name}</a>
            {toggle}
        </li>
    }
}

/// Off-canvas category sidebar for small screens.
#[component]
pub fn CategorySidebar(entries: Vec<CategoryEntry>) -> impl IntoView {
    let config = use_storefront().config.with_value(|c| c.sidebar.clone());
    let sidebar = RwSignal::new(SidebarMenu::new(config));
    let open = Memo::new(move |_| sidebar.with(SidebarMenu::is_open));

    Effect::new(move |_| {
        let locked = sidebar.with(SidebarMenu::body_scroll_locked);
        if let Some(body) = document().body() {
            let overflow = if locked { "hidden" } else { "" };
            if let Err(e) = body.style().set_property("overflow", overflow) {
                tracing::warn!(error = ?e, "could not lock body scroll");
            }
        }
    });

    let keys = window_event_listener(ev::keydown, move |ev| {
        if sidebar.with_untracked(SidebarMenu::is_open) {
            let key = ev.key();
            sidebar.update(|s| {
                s.key(&key);
            });
        }
    });
    let resize = window_event_listener(ev::resize, move |_| {
        if sidebar.with_untracked(SidebarMenu::is_open) {
            let width = viewport_width();
            sidebar.update(|s| {
                s.resize(width);
            });
        }
    });
    on_cleanup(move || {
        keys.remove();
        resize.remove();
    });

    let close = move |reason: CloseReason| {
        sidebar.update(|s| {
            s.close(reason);
        })
    };

    view! {
        <button
            type="button"
            class="categories-menu-toggle"
            on:click=move |_| sidebar.update(|s| {
                s.open();
            })
        >
            <i class="fas fa-bars"></i>
            " Categories"
        </button>
        <div
            class=move || if open.get() { "categories-overlay show" } else { "categories-overlay" }
            on:click=move |_| close(CloseReason::Overlay)
        ></div>
        <aside class=move || if open.get() { "categories-sidebar show" } else { "categories-sidebar" }>
            <div class="sidebar-header">
                <h5>"Categories"</h5>
                <button
                    type="button"
                    class="btn-close"
                    aria-label="Close"
                    on:click=move |_| close(CloseReason::CloseButton)
                ></button>
            </div>
            <CategoryNav entries=entries/>
        </aside>
    }
}
