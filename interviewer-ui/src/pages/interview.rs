//! Interview Page
//!
//! The wizard for one candidate with the notes sidebar beside it.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{LoadingLine, SaveIndicator, Sidebar, StepControls, StepNav, StepView};
use crate::state::{log_error, GlobalState};

#[derive(Params, PartialEq, Clone)]
struct InterviewParams {
    id: String,
}

/// Interview wizard page component
#[component]
pub fn Interview() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let params = use_params::<InterviewParams>();

    let loaded = create_memo(move |_| state.current.with(|c| c.is_some()));
    let id = move || params.with(|p| p.as_ref().map(|p| p.id.clone()).unwrap_or_default());

    create_effect(move |_| {
        let id = id();
        if id.is_empty() {
            return;
        }
        state.close_candidate();

        spawn_local(async move {
            state.loading.set(true);
            match api::fetch_candidate(&id).await {
                Ok(candidate) => state.open_candidate(candidate),
                Err(e) => {
                    log_error(&format!("Failed to fetch candidate {}: {}", id, e));
                    state.show_error(&e);
                }
            }
            state.loading.set(false);
        });
    });

    view! {
        {move || {
            if loaded.get() {
                view! {
                    <div class="flex flex-col lg:flex-row gap-8">
                        <div class="flex-1 space-y-6">
                            <StepNav />
                            <SaveIndicator />
                            <div class="bg-gray-900 rounded-xl">
                                <StepView />
                            </div>
                            <StepControls />
                        </div>
                        <Show when=move || state.sidebar_open.get()>
                            <Sidebar />
                        </Show>
                    </div>
                }.into_view()
            } else if state.loading.get() {
                view! { <LoadingLine text="Loading candidate..." /> }.into_view()
            } else {
                view! {
                    <div class="text-center py-12 space-y-4">
                        <p class="text-gray-400">{move || format!("Candidate {} could not be loaded.", id())}</p>
                        <A href="/" class="text-primary-400 hover:underline">"Back to candidates"</A>
                    </div>
                }.into_view()
            }
        }}
    }
}
