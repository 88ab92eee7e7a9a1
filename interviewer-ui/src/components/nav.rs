//! Navigation Component
//!
//! Header bar with brand, the candidate list link and the sidebar toggle.

use leptos::*;
use leptos_router::*;

use crate::state::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🗂"</span>
                        <span class="text-xl font-bold text-white">"Interviewer"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        {move || state.current_id().map(|id| view! {
                            <span class="px-4 py-2 text-sm text-gray-400 font-mono">{id}</span>
                        })}
                        <A
                            href="/"
                            exact=true
                            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                            active_class="bg-gray-700 text-white"
                        >
                            "Candidates"
                        </A>
                        <button
                            on:click=move |_| state.sidebar_open.update(|open| *open = !*open)
                            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                        >
                            {move || if state.sidebar_open.get() { "Hide sidebar" } else { "Show sidebar" }}
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}
