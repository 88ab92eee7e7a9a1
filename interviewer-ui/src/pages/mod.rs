//! Pages
//!
//! Top-level page components for each route.

pub mod candidates;
pub mod interview;

pub use candidates::Candidates;
pub use interview::Interview;
