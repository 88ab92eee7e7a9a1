//! Step Navigation Components
//!
//! Step buttons across the top of the wizard and back/next controls below it.

use leptos::*;

use crate::state::{GlobalState, WizardStep};

/// One button per step; any step can be opened directly
#[component]
pub fn StepNav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <ol class="grid grid-cols-4 gap-2">
            {WizardStep::ALL.into_iter().map(|step| view! {
                <li>
                    <button
                        type="button"
                        on:click=move |_| state.step.set(step)
                        class=move || {
                            let base = "w-full px-3 py-2 rounded-lg text-sm font-medium transition-colors text-left";
                            if state.step.get() == step {
                                format!("{} bg-primary-600 text-white", base)
                            } else {
                                format!("{} bg-gray-800 text-gray-400 hover:text-white", base)
                            }
                        }
                    >
                        <span class="block text-xs opacity-75">{format!("Step {}", step.index() + 1)}</span>
                        {step.label()}
                    </button>
                </li>
            }).collect_view()}
        </ol>
    }
}

/// Back and next buttons
#[component]
pub fn StepControls() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="flex justify-between pt-4">
            <button
                type="button"
                disabled=move || state.step.get().is_first()
                on:click=move |_| state.step.update(|s| *s = s.previous())
                class="px-6 py-3 bg-gray-700 hover:bg-gray-600 disabled:opacity-40
                       rounded-lg font-medium transition-colors"
            >
                "Back"
            </button>
            <button
                type="button"
                disabled=move || state.step.get().is_last()
                on:click=move |_| state.step.update(|s| *s = s.next())
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:opacity-40
                       rounded-lg font-medium transition-colors"
            >
                "Next"
            </button>
        </div>
    }
}
