//! UI Components
//!
//! Reusable Leptos components for the interview wizard.

pub mod field_editor;
pub mod nav;
pub mod rating_scale;
pub mod sidebar;
pub mod status;
pub mod step_nav;
pub mod steps;

pub use field_editor::FieldEditor;
pub use nav::Nav;
pub use rating_scale::RatingScale;
pub use sidebar::Sidebar;
pub use status::{LoadingLine, NoticeBar, SaveIndicator};
pub use step_nav::{StepControls, StepNav};
pub use steps::StepView;
