//! Rating Scale Component
//!
//! Five buttons rating one dimension from 1 (poor) to 5 (excellent).

use leptos::*;

use crate::state::candidate::{ratings_update, MAX_RATING, MIN_RATING};
use crate::state::{Dimension, GlobalState};

#[component]
pub fn RatingScale(dimension: Dimension) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let selected = move || {
        state
            .current
            .with(|c| c.as_ref().and_then(|c| c.rating(dimension)))
    };

    let rate = move |value: u8| {
        let mut changed = false;
        state.edit_current(|c| changed = c.set_rating(dimension, value));
        if !changed {
            return;
        }

        if let Some(body) = state.current.with(|c| c.as_ref().map(ratings_update)) {
            state.save_current(body);
        }
    };

    view! {
        <div class="bg-gray-800 rounded-lg p-4">
            <div class="flex items-center justify-between mb-1">
                <span class="font-medium">{dimension.label()}</span>
                <span class="text-sm text-gray-400">
                    {move || selected().map(|v| format!("{} / {}", v, MAX_RATING)).unwrap_or_else(|| "–".to_string())}
                </span>
            </div>
            <p class="text-xs text-gray-500 mb-3">{dimension.hint()}</p>
            <div class="flex space-x-2">
                {(MIN_RATING..=MAX_RATING).map(|value| view! {
                    <button
                        type="button"
                        on:click=move |_| rate(value)
                        class=move || {
                            let base = "w-10 h-10 rounded-lg font-semibold transition-colors";
                            if selected() == Some(value) {
                                format!("{} bg-primary-600 text-white", base)
                            } else {
                                format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                            }
                        }
                    >
                        {value}
                    </button>
                }).collect_view()}
            </div>
        </div>
    }
}
