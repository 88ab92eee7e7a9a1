//! Evaluation Reports
//!
//! - [`html`]: builds the report document for a candidate
//! - [`pdf`]: prints it to PDF through a [`ReportRenderer`]

pub mod html;
pub mod pdf;

pub use html::build_report_html;
pub use pdf::{ChromiumRenderer, ReportRenderer};

use thiserror::Error;

/// Errors while producing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF renderer '{binary}' could not be started: {error}")]
    RendererUnavailable { binary: String, error: String },

    #[error("PDF generation failed: {0}")]
    RendererFailed(String),

    #[error("PDF generation timed out after {0}s")]
    Timeout(u64),

    #[error("Report template error: {0}")]
    Template(#[from] askama::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
