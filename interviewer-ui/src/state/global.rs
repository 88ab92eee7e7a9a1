//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;
use serde_json::Value;

use super::candidate::{Candidate, CandidateSummary};
use super::wizard::{SaveTracker, SidebarTab, WizardStep};
use crate::api;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Candidate list from the API
    pub candidates: RwSignal<Vec<CandidateSummary>>,
    /// Candidate currently open in the wizard
    pub current: RwSignal<Option<Candidate>>,
    /// Current wizard step
    pub step: RwSignal<WizardStep>,
    /// Sidebar visibility
    pub sidebar_open: RwSignal<bool>,
    /// Active sidebar tab
    pub sidebar_tab: RwSignal<SidebarTab>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Field saves for the open candidate
    pub saves: RwSignal<SaveTracker>,
    /// Banner above the page, cleared after a few seconds
    pub notice: RwSignal<Option<Notice>>,
    notice_seq: StoredValue<u32>,
}

/// Outcome of a list or report action
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub seq: u32,
    pub text: String,
    pub is_error: bool,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        candidates: create_rw_signal(Vec::new()),
        current: create_rw_signal(None),
        step: create_rw_signal(WizardStep::default()),
        sidebar_open: create_rw_signal(true),
        sidebar_tab: create_rw_signal(SidebarTab::default()),
        loading: create_rw_signal(false),
        saves: create_rw_signal(SaveTracker::default()),
        notice: create_rw_signal(None),
        notice_seq: store_value(0),
    };

    provide_context(state);
}

impl GlobalState {
    /// Open a freshly fetched candidate at the first step
    pub fn open_candidate(&self, candidate: Candidate) {
        self.current.set(Some(candidate));
        self.step.set(WizardStep::default());
        self.saves.set(SaveTracker::default());
    }

    pub fn close_candidate(&self) {
        self.current.set(None);
    }

    pub fn current_id(&self) -> Option<String> {
        self.current.with(|c| c.as_ref().map(|c| c.id.clone()))
    }

    /// Change the open candidate in place
    pub fn edit_current(&self, f: impl FnOnce(&mut Candidate)) {
        self.current.update(|current| {
            if let Some(candidate) = current.as_mut() {
                f(candidate);
            }
        });
    }

    /// PUT `body` for the open candidate in the background
    pub fn save_current(&self, body: Value) {
        let Some(id) = self.current_id() else {
            return;
        };

        let state = *self;
        state.saves.update(|saves| saves.started());
        spawn_local(async move {
            let result = api::update_candidate(&id, &body).await;
            if let Err(e) = &result {
                log_error(&format!("Failed to save {}: {}", id, e));
            }
            state.saves.update(|saves| saves.finished(result));
        });
    }

    pub fn show_success(&self, message: &str) {
        self.notify(message, false, 3000);
    }

    pub fn show_error(&self, message: &str) {
        self.notify(message, true, 5000);
    }

    /// Replace the banner; its timer only clears the notice it was set for
    fn notify(&self, message: &str, is_error: bool, millis: u32) {
        let seq = self.notice_seq.get_value().wrapping_add(1);
        self.notice_seq.set_value(seq);
        self.notice.set(Some(Notice {
            seq,
            text: message.to_string(),
            is_error,
        }));

        let notice = self.notice;
        gloo_timers::callback::Timeout::new(millis, move || {
            if notice.with_untracked(|n| n.as_ref().map(|n| n.seq)) == Some(seq) {
                notice.set(None);
            }
        })
        .forget();
    }
}

pub fn log_error(message: &str) {
    web_sys::console::error_1(&message.into());
}
