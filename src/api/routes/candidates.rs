//! Candidate Routes
//!
//! CRUD endpoints for interview records.
//!
//! - GET /api/candidates - List all candidates
//! - POST /api/candidates - Create a new candidate
//! - GET /api/candidates/:id - Get a specific candidate
//! - PUT /api/candidates/:id - Update fields of a candidate
//! - DELETE /api/candidates/:id - Delete a candidate

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CandidateListResponse, CreateCandidateResponse, StatusResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::candidate::{format_timestamp, Candidate, CandidateUpdate};

/// GET /api/candidates
///
/// List all candidates, oldest first.
pub async fn list_candidates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CandidateListResponse>> {
    let candidates = state.store.list().await?;
    Ok(Json(CandidateListResponse { candidates }))
}

/// POST /api/candidates
///
/// Create an empty candidate. The server assigns id and creation time.
pub async fn create_candidate(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<CreateCandidateResponse>)> {
    let candidate = state.store.create().await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCandidateResponse {
            created_at: format_timestamp(&candidate.created_at),
            id: candidate.id,
        }),
    ))
}

/// GET /api/candidates/:id
pub async fn get_candidate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Candidate>> {
    let candidate = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Candidate {} not found", id)))?;

    Ok(Json(candidate))
}

/// PUT /api/candidates/:id
///
/// Partial update keyed by field name. Unknown keys are ignored; a body
/// without any known key is rejected.
pub async fn update_candidate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Json(body) = body.map_err(|e| ApiError::Validation(format!("Invalid JSON: {}", e)))?;
    let update = CandidateUpdate::from_json(&body)?;

    state.store.update(&id, &update).await?;

    Ok(Json(StatusResponse::new("updated")))
}

/// DELETE /api/candidates/:id
pub async fn delete_candidate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<StatusResponse>> {
    state.store.delete(&id).await?;
    Ok(Json(StatusResponse::new("deleted")))
}
