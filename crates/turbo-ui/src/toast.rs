//! Toast notification outlet.

use leptos::prelude::*;

use crate::context::{use_storefront, use_ticker};

/// Renders the current notification in the top corner and drops it when it expires.
#[component]
pub fn ToastHost() -> impl IntoView {
    let notices = use_storefront().notices;

    use_ticker(move |now| {
        let due = notices.with_untracked(|n| n.next_deadline().is_some_and(|d| now >= d));
        if due {
            notices.update(|n| {
                n.tick(now);
            });
        }
    });

    move || {
        notices.with(|n| n.current().cloned()).map(|notice| {
            view! {
                <div
                    class=format!(
                        "alert {} alert-dismissible fade show custom-alert",
                        notice.kind.alert_class(),
                    )
                    role="alert"
                >
                    {notice.message}
                    <button
                        type="button"
                        class="btn-close"
                        aria-label="Close"
                        on:click=move |_| notices.update(|n| {
                            n.dismiss();
                        })
                    ></button>
                </div>
            }
        })
    }
}
