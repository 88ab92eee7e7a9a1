//! Wizard Step Components
//!
//! One component per interview step.

use chrono::{SecondsFormat, Utc};
use leptos::*;

use crate::api;
use crate::components::{FieldEditor, RatingScale};
use crate::state::candidate::consent_update;
use crate::state::{log_error, Dimension, GlobalState, TextField, WizardStep};

/// Renders the current step
#[component]
pub fn StepView() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    move || match state.step.get() {
        WizardStep::Intro => view! { <IntroStep /> }.into_view(),
        WizardStep::Reflection => view! { <ReflectionStep /> }.into_view(),
        WizardStep::Ratings => view! { <RatingsStep /> }.into_view(),
        WizardStep::Conclusion => view! { <ConclusionStep /> }.into_view(),
    }
}

#[component]
fn IntroStep() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let consented = move || {
        state
            .current
            .with(|c| c.as_ref().map(|c| c.consented))
            .unwrap_or(false)
    };

    let consent_date = move || {
        state
            .current
            .with(|c| c.as_ref().and_then(|c| c.consent_date.clone()))
    };

    let on_toggle = move |ev| {
        let checked = event_target_checked(&ev);
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        state.edit_current(|c| c.set_consent(checked, &now));

        if let Some(body) = state.current.with(|c| c.as_ref().map(consent_update)) {
            state.save_current(body);
        }
    };

    view! {
        <section class="space-y-4">
            <h2 class="text-2xl font-semibold">"Introduction"</h2>
            <p class="text-gray-300">
                "Welcome the candidate and explain the structure of the interview: a short \
                 self-reflection, questions about past situations, and time for the candidate's \
                 own questions at the end."
            </p>
            <p class="text-gray-300">
                "The interview is recorded under an anonymised id. Notes and ratings are only \
                 used for this application process."
            </p>

            <label class="flex items-center space-x-3 bg-gray-800 rounded-lg p-4 cursor-pointer">
                <input
                    type="checkbox"
                    prop:checked=consented
                    on:change=on_toggle
                    class="w-5 h-5"
                />
                <span>"The candidate consents to the processing of interview data"</span>
            </label>

            {move || consent_date().map(|date| view! {
                <p class="text-sm text-gray-400">{format!("Consent given {}", date)}</p>
            })}
        </section>
    }
}

#[component]
fn ReflectionStep() -> impl IntoView {
    view! {
        <section class="space-y-4">
            <h2 class="text-2xl font-semibold">"Self-reflection"</h2>
            <p class="text-gray-300">
                "Ask the candidate how they would describe their strengths and where they see \
                 room to grow."
            </p>
            <FieldEditor
                field=TextField::SelfReflection
                label="Candidate's self-reflection"
                placeholder="In the candidate's own words"
                rows=8
            />
            <FieldEditor
                field=TextField::ReflectionConsistency
                label="Consistency with observed behaviour"
                placeholder="Does the self-image match what you observed?"
                rows=4
            />
        </section>
    }
}

#[component]
fn RatingsStep() -> impl IntoView {
    view! {
        <section class="space-y-4">
            <h2 class="text-2xl font-semibold">"Ratings"</h2>
            <p class="text-gray-300">"Rate each dimension from 1 (poor) to 5 (excellent)."</p>
            <div class="grid md:grid-cols-2 gap-4">
                {Dimension::ALL.into_iter().map(|dimension| view! {
                    <RatingScale dimension=dimension />
                }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn ConclusionStep() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let completeness = move || state.current.with(|c| c.as_ref().map(|c| c.completeness()));
    let (exporting, set_exporting) = create_signal(false);

    let export = move |_| {
        let Some(id) = state.current_id() else {
            return;
        };
        set_exporting.set(true);

        spawn_local(async move {
            let result = match api::export_pdf(&id).await {
                Ok(bytes) => {
                    api::download_file(&format!("{}.pdf", id), "application/pdf", &bytes)
                }
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => state.show_success("Report exported"),
                Err(e) => {
                    log_error(&format!("Export of {} failed: {}", id, e));
                    state.show_error(&e);
                }
            }
            set_exporting.set(false);
        });
    };

    view! {
        <section class="space-y-4">
            <h2 class="text-2xl font-semibold">"Conclusion"</h2>

            {move || completeness().map(|c| {
                let class = if c.is_complete() {
                    "rounded-lg p-4 bg-green-900/40 text-green-300"
                } else {
                    "rounded-lg p-4 bg-yellow-900/40 text-yellow-300"
                };
                view! { <div class=class>{c.message()}</div> }
            })}

            <FieldEditor
                field=TextField::Conclusion
                label="Overall conclusion"
                placeholder="Recommendation and reasoning"
                rows=8
            />

            <button
                type="button"
                on:click=export
                disabled=move || exporting.get()
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       rounded-lg font-medium transition-colors"
            >
                {move || if exporting.get() { "Exporting..." } else { "Export PDF" }}
            </button>
        </section>
    }
}
