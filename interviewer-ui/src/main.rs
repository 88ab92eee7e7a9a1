//! Interviewer Wizard
//!
//! Browser client for structured candidate interviews, built with Leptos (WASM).
//!
//! # Features
//!
//! - Candidate list with create and delete
//! - Four-step interview wizard: consent, self-reflection, ratings, conclusion
//! - Sidebar with interview notes and STAR / VeSiEr reference text
//! - PDF export of the evaluation
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All data lives on the interviewer REST API; the client keeps
//! only the candidate currently open.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
