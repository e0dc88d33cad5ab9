//! Header search bar with suggestions.

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use turbo_widgets::search::{KeyOutcome, SearchBox, SearchKey, StaticSuggestions};
use web_time::{Duration, Instant};

use crate::context::{use_storefront, use_ticker};

const SHAKE: Duration = Duration::from_millis(500);

#[component]
pub fn SearchBar(
    #[prop(into, optional)] action: Option<String>,
    #[prop(into, optional)] placeholder: Option<String>,
) -> impl IntoView {
    let config = use_storefront().config.with_value(|c| c.search.clone());
    let search = RwSignal::new(SearchBox::<StaticSuggestions>::from_config(config));
    let form_ref = NodeRef::<html::Form>::new();
    let input_ref = NodeRef::<html::Input>::new();
    let shaking = RwSignal::new(false);

    use_ticker(move |now| {
        let due = search.with_untracked(|s| s.next_deadline().is_some_and(|d| now >= d));
        if due {
            search.update(|s| {
                s.tick(now);
            });
        }
    });

    // Picking a suggestion bypasses the submit handler, like a scripted form submit.
    let fill_and_submit = move |query: String| {
        if let Some(input) = input_ref.get_untracked() {
            input.set_value(&query);
        }
        if let Some(form) = form_ref.get_untracked() {
            if let Err(e) = form.submit() {
                tracing::warn!(error = ?e, "search form submit failed");
            }
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        if search.try_update(|s| s.submit()).flatten().is_none() {
            ev.prevent_default();
            shaking.set(true);
            set_timeout(move || shaking.set(false), SHAKE);
            if let Some(input) = input_ref.get_untracked() {
                if let Err(e) = input.focus() {
                    tracing::debug!(error = ?e, "search input refocus failed");
                }
            }
        }
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        let Some(key) = SearchKey::from_key(&ev.key()) else {
            return;
        };
        match search.try_update(|s| s.key(key)).unwrap_or(KeyOutcome::Ignored) {
            KeyOutcome::Ignored => {}
            KeyOutcome::Handled => ev.prevent_default(),
            KeyOutcome::Submit(query) => {
                ev.prevent_default();
                fill_and_submit(query);
            }
        }
    };

    let suggestions = move || {
        search.with(|s| {
            if !s.suggestions_visible() {
                return None;
            }
            let selected = s.selected();
            let rows: Vec<(usize, String, bool)> = s
                .suggestions()
                .iter()
                .enumerate()
                .map(|(i, text)| (i, text.clone(), selected == Some(i)))
                .collect();
            Some(rows)
        })
        .map(|rows| {
            view! {
                <div class="search-suggestions">
                    {rows
                        .into_iter()
                        .map(|(i, text, is_selected)| {
                            view! {
                                <div
                                    class=if is_selected { "p-2 border-bottom bg-light" } else { "p-2 border-bottom" }
                                    on:mousedown=move |ev| {
                                        ev.prevent_default();
                                        if let Some(query) = search.try_update(|s| s.pick(i)).flatten() {
                                            fill_and_submit(query);
                                        }
                                    }
                                >
                                    {text}
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            }
        })
    };

    view! {
        <form
            class="search-form"
            method="get"
            action=action.unwrap_or_else(|| "/search/".to_string())
            node_ref=form_ref
            on:submit=on_submit
        >
            <div
                class="search-container"
                style=move || if shaking.get() { "animation: shake 0.5s ease-in-out" } else { "" }
            >
                <input
                    type="search"
                    name="q"
                    class="form-control"
                    autocomplete="off"
                    placeholder=placeholder.unwrap_or_else(|| "Search products...".to_string())
                    node_ref=input_ref
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        search.update(|s| s.input(&value, Instant::now()));
                    }
                    on:keydown=on_keydown
                    on:focus=move |_| search.update(|s| s.focus())
                    on:blur=move |_| search.update(|s| s.blur(Instant::now()))
                />
                <button type="submit" class="search-btn" aria-label="Search">
                    <i class="fas fa-search"></i>
                </button>
                {suggestions}
            </div>
        </form>
    }
}
