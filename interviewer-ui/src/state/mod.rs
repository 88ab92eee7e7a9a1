//! State Management
//!
//! Global reactive state, the wizard step machine and the candidate model.

pub mod candidate;
pub mod global;
pub mod wizard;

pub use candidate::{Candidate, CandidateSummary, Completeness, Dimension, TextField};
pub use global::{log_error, provide_global_state, GlobalState, Notice};
pub use wizard::{SaveStatus, SaveTracker, SidebarTab, WizardStep};
