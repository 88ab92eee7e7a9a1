//! Export Routes
//!
//! Evaluation report download.
//!
//! - POST /api/candidates/:id/export - PDF report (`?format=html` for the HTML source)

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::dto::ExportParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::report::build_report_html;

/// POST /api/candidates/:id/export
///
/// Render the evaluation report and return it as an attachment.
pub async fn export_candidate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    let candidate = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Candidate {} not found", id)))?;

    let html = build_report_html(&candidate)?;

    let (body, content_type, extension) = match params.format.to_lowercase().as_str() {
        "pdf" => {
            let started = std::time::Instant::now();
            let pdf = state.renderer.render_pdf(&html).await?;
            tracing::info!(
                candidate_id = %id,
                bytes = pdf.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Rendered PDF report"
            );
            (Body::from(pdf), "application/pdf", "pdf")
        }
        "html" => (Body::from(html), "text/html; charset=utf-8", "html"),
        other => {
            return Err(ApiError::Validation(format!(
                "Invalid export format: {}. Use pdf or html",
                other
            )))
        }
    };

    let disposition = format!("attachment; filename=\"{}.{}\"", candidate.id, extension);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
