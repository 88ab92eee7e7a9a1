//! Sidebar Component
//!
//! Interview notes next to the wizard, one tab per note kind. The STAR and
//! VeSiEr tabs show the method as a reference above their notes field. The
//! footer holds the API URL setting.

use leptos::*;

use crate::api;
use crate::components::FieldEditor;
use crate::state::{GlobalState, SidebarTab, TextField};

struct MethodStep {
    letter: &'static str,
    name: &'static str,
    prompt: &'static str,
}

static STAR: [MethodStep; 4] = [
    MethodStep {
        letter: "S",
        name: "Situation",
        prompt: "What was the context? Where, when, who was involved?",
    },
    MethodStep {
        letter: "T",
        name: "Task",
        prompt: "What was the candidate responsible for? What was the goal?",
    },
    MethodStep {
        letter: "A",
        name: "Action",
        prompt: "What did the candidate do personally, step by step?",
    },
    MethodStep {
        letter: "R",
        name: "Result",
        prompt: "What was the outcome? What did they learn from it?",
    },
];

static VESIER: [MethodStep; 3] = [
    MethodStep {
        letter: "Ve",
        name: "Verhalten (behaviour)",
        prompt: "Which concrete behaviour did the candidate show?",
    },
    MethodStep {
        letter: "Si",
        name: "Situation",
        prompt: "In which situation did this behaviour occur?",
    },
    MethodStep {
        letter: "Er",
        name: "Ergebnis (result)",
        prompt: "What did the behaviour lead to?",
    },
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <aside class="w-full lg:w-96 shrink-0 bg-gray-800 rounded-xl p-4 flex flex-col space-y-4">
            <div class="flex space-x-2">
                {SidebarTab::ALL.into_iter().map(|tab| view! {
                    <button
                        type="button"
                        on:click=move |_| state.sidebar_tab.set(tab)
                        class=move || {
                            let base = "flex-1 px-3 py-2 rounded-lg text-sm font-medium transition-colors";
                            if state.sidebar_tab.get() == tab {
                                format!("{} bg-gray-600 text-white", base)
                            } else {
                                format!("{} bg-gray-700 text-gray-400 hover:text-white", base)
                            }
                        }
                    >
                        {tab.label()}
                    </button>
                }).collect_view()}
            </div>

            <div class="flex-1">
                {move || match state.sidebar_tab.get() {
                    SidebarTab::Notes => view! {
                        <FieldEditor
                            field=TextField::Notes
                            label="General notes"
                            placeholder="Observations during the interview"
                            rows=14
                        />
                    }.into_view(),
                    SidebarTab::Star => view! {
                        <MethodReference title="STAR method" steps=&STAR />
                        <FieldEditor field=TextField::StarNotes label="STAR notes" rows=10 />
                    }.into_view(),
                    SidebarTab::Vesier => view! {
                        <MethodReference title="VeSiEr method" steps=&VESIER />
                        <FieldEditor field=TextField::VesierNotes label="VeSiEr notes" rows=10 />
                    }.into_view(),
                }}
            </div>

            <ApiSettings />
        </aside>
    }
}

#[component]
fn MethodReference(title: &'static str, steps: &'static [MethodStep]) -> impl IntoView {
    view! {
        <div class="mb-4">
            <h3 class="font-semibold mb-2">{title}</h3>
            <dl class="space-y-2 text-sm">
                {steps.iter().map(|step| view! {
                    <div class="flex space-x-3">
                        <dt class="w-8 shrink-0 font-bold text-primary-400">{step.letter}</dt>
                        <dd>
                            <span class="font-medium">{step.name}</span>
                            <span class="block text-gray-400">{step.prompt}</span>
                        </dd>
                    </div>
                }).collect_view()}
            </dl>
        </div>
    }
}

/// API base URL, kept in local storage
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);

    let save_and_test = move |_| {
        api::set_api_base(&api_url.get());
        set_testing.set(true);

        spawn_local(async move {
            match api::check_status().await {
                Ok(_) => state.show_success("API connection OK"),
                Err(e) => {
                    crate::state::log_error(&format!("API check failed: {}", e));
                    state.show_error(&format!("Connection failed: {}", e));
                }
            }
            set_testing.set(false);
        });
    };

    view! {
        <div class="border-t border-gray-700 pt-4">
            <label class="block text-xs text-gray-400 mb-2">"API URL"</label>
            <div class="flex space-x-2">
                <input
                    type="text"
                    prop:value=move || api_url.get()
                    on:input=move |ev| set_api_url.set(event_target_value(&ev))
                    class="flex-1 bg-gray-700 rounded-lg px-3 py-2 text-sm
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=save_and_test
                    disabled=move || testing.get()
                    class="px-3 py-2 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                           rounded-lg text-sm font-medium transition-colors"
                >
                    {move || if testing.get() { "Testing..." } else { "Save" }}
                </button>
            </div>
        </div>
    }
}
