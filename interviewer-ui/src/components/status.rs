//! Status Components
//!
//! The notice banner, the wizard's save indicator and loading placeholders.

use leptos::*;

use crate::state::{GlobalState, SaveStatus};

/// Banner for the last create, delete or export outcome
#[component]
pub fn NoticeBar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    move || {
        state.notice.get().map(|notice| {
            let class = if notice.is_error {
                "mb-6 px-4 py-3 rounded-lg border border-red-700 bg-red-900/40 text-red-200 text-sm"
            } else {
                "mb-6 px-4 py-3 rounded-lg border border-green-700 bg-green-900/40 text-green-200 text-sm"
            };
            view! {
                <div class=class role="status">
                    {notice.text}
                    <button
                        type="button"
                        on:click=move |_| state.notice.set(None)
                        class="float-right opacity-60 hover:opacity-100"
                    >
                        "Dismiss"
                    </button>
                </div>
            }
        })
    }
}

/// Whether the wizard's field edits have reached the server
#[component]
pub fn SaveIndicator() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let status = create_memo(move |_| state.saves.with(|s| s.status()));

    view! {
        <p class=move || match status.get() {
            SaveStatus::Failed(_) => "text-sm text-red-400",
            SaveStatus::Saving => "text-sm text-gray-400 italic",
            _ => "text-sm text-gray-500",
        }>
            {move || status.get().label()}
        </p>
    }
}

/// Muted placeholder while a fetch is in flight
#[component]
pub fn LoadingLine(#[prop(into)] text: String) -> impl IntoView {
    view! {
        <p class="text-gray-400 text-center py-8 animate-pulse">{text}</p>
    }
}
