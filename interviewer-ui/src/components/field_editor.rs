//! Field Editor Component
//!
//! Textarea bound to one text field of the open candidate. Edits update the
//! local record as you type and are saved when the textarea loses focus.

use leptos::*;

use crate::state::candidate::text_update;
use crate::state::{GlobalState, TextField};

#[component]
pub fn FieldEditor(
    field: TextField,
    #[prop(into)]
    label: String,
    #[prop(optional, into)]
    placeholder: String,
    #[prop(default = 6)]
    rows: u32,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let value = move || {
        state
            .current
            .with(|c| c.as_ref().map(|c| c.text(field).to_string()))
            .unwrap_or_default()
    };

    let on_input = move |ev| {
        let text = event_target_value(&ev);
        state.edit_current(|c| c.set_text(field, text));
    };

    let on_change = move |ev| {
        let text = event_target_value(&ev);
        state.save_current(text_update(field, &text));
    };

    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <textarea
                rows=rows
                placeholder=placeholder
                prop:value=value
                on:input=on_input
                on:change=on_change
                class="w-full bg-gray-700 rounded-lg px-4 py-3 text-white
                       border border-gray-600 focus:border-primary-500 focus:outline-none"
            />
        </div>
    }
}
