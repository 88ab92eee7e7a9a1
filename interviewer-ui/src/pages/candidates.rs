//! Candidates Page
//!
//! List of all interviews with create, open and delete.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::LoadingLine;
use crate::state::candidate::confirm_delete;
use crate::state::{log_error, CandidateSummary, GlobalState};

/// Candidate list page component
#[component]
pub fn Candidates() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    state.close_candidate();

    create_effect(move |_| {
        spawn_local(async move {
            state.loading.set(true);
            match api::fetch_candidates().await {
                Ok(candidates) => state.candidates.set(candidates),
                Err(e) => {
                    log_error(&format!("Failed to fetch candidates: {}", e));
                    state.show_error(&e);
                }
            }
            state.loading.set(false);
        });
    });

    let (creating, set_creating) = create_signal(false);

    let create = move |_| {
        set_creating.set(true);
        let navigate = navigate.clone();

        spawn_local(async move {
            match api::create_candidate().await {
                Ok(created) => {
                    state.show_success(&format!("Created {}", created.id));
                    navigate(&format!("/candidates/{}", created.id), Default::default());
                }
                Err(e) => {
                    log_error(&format!("Failed to create candidate: {}", e));
                    state.show_error(&e);
                }
            }
            set_creating.set(false);
        });
    };

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Candidates"</h1>
                    <p class="text-gray-400 mt-1">"Structured interviews, one record per candidate"</p>
                </div>
                <button
                    on:click=create
                    disabled=move || creating.get()
                    class="px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors"
                >
                    {move || if creating.get() { "Creating..." } else { "New candidate" }}
                </button>
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                {move || {
                    if state.loading.get() {
                        view! { <LoadingLine text="Loading candidates..." /> }.into_view()
                    } else if state.candidates.with(|c| c.is_empty()) {
                        view! {
                            <p class="text-gray-400 text-center py-8">
                                "No candidates yet. Start an interview with \"New candidate\"."
                            </p>
                        }.into_view()
                    } else {
                        view! {
                            <ul class="divide-y divide-gray-700">
                                {state.candidates.get().into_iter().map(|candidate| view! {
                                    <CandidateRow candidate=candidate />
                                }).collect_view()}
                            </ul>
                        }.into_view()
                    }
                }}
            </section>
        </div>
    }
}

#[component]
fn CandidateRow(candidate: CandidateSummary) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let id = candidate.id.clone();

    let delete = move |_| {
        let confirmed = confirm_delete(&id, |message| {
            web_sys::window()
                .and_then(|w| w.confirm_with_message(message).ok())
                .unwrap_or(false)
        });
        if !confirmed {
            return;
        }

        let id = id.clone();
        spawn_local(async move {
            match api::delete_candidate(&id).await {
                Ok(()) => {
                    state.candidates.update(|list| list.retain(|c| c.id != id));
                    state.show_success(&format!("Deleted {}", id));
                }
                Err(e) => {
                    log_error(&format!("Failed to delete {}: {}", id, e));
                    state.show_error(&e);
                }
            }
        });
    };

    let created = chrono::DateTime::parse_from_rfc3339(&candidate.created_at)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| candidate.created_at.clone());
    let (consent_class, consent_label) = if candidate.consented {
        ("text-sm text-green-400", "Consent given")
    } else {
        ("text-sm text-gray-500", "No consent yet")
    };

    view! {
        <li class="flex items-center justify-between py-3">
            <A href=format!("/candidates/{}", candidate.id) class="flex-1 flex items-center space-x-6 hover:text-primary-400">
                <span class="font-mono">{candidate.id.clone()}</span>
                <span class="text-sm text-gray-400">{created}</span>
                <span class=consent_class>{consent_label}</span>
            </A>
            <button
                on:click=delete
                class="px-3 py-2 text-sm text-red-400 hover:text-white hover:bg-red-600 rounded-lg transition-colors"
            >
                "Delete"
            </button>
        </li>
    }
}
