//! Interviewer REST API
//!
//! HTTP API layer, built with Axum.
//!
//! # Endpoints
//!
//! ## Candidates
//! - `GET /api/candidates` - List all candidates
//! - `POST /api/candidates` - Create a candidate
//! - `GET /api/candidates/:id` - Get a candidate
//! - `PUT /api/candidates/:id` - Update candidate fields
//! - `DELETE /api/candidates/:id` - Delete a candidate
//!
//! ## Export
//! - `POST /api/candidates/:id/export` - PDF evaluation report
//!
//! ## Health
//! - `GET /api/status` - Plain status
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use interviewer::api::{serve, AppState};
//! use interviewer::config::Config;
//! use interviewer::storage::CandidateStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let store = Arc::new(CandidateStore::open(config.storage.database_path.as_ref())?);
//!
//!     let state = AppState::new(store, config.clone());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/candidates",
            get(routes::candidates::list_candidates).post(routes::candidates::create_candidate),
        )
        .route(
            "/candidates/:id",
            get(routes::candidates::get_candidate)
                .put(routes::candidates::update_candidate)
                .delete(routes::candidates::delete_candidate),
        )
        // PDF rendering has its own timeout, so export sits outside this layer
        .layer(TimeoutLayer::new(state.request_timeout()))
        .route(
            "/candidates/:id/export",
            post(routes::export::export_candidate),
        )
        .route("/status", get(routes::health::status));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    serve_with_listener(state, listener, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_with_listener(
    state: AppState,
    listener: tokio::net::TcpListener,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), ApiError> {
    let router = build_router(state);

    tracing::info!("Interviewer API listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Interviewer API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ErrorResponse;
    use crate::candidate::{Candidate, Dimension};
    use crate::config::Config;
    use crate::report::{ReportRenderer, ReportResult};
    use crate::storage::CandidateStore;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde::de::DeserializeOwned;
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    /// Renderer that wraps the HTML length in a fake PDF
    struct StubRenderer;

    #[async_trait]
    impl ReportRenderer for StubRenderer {
        async fn render_pdf(&self, html: &str) -> ReportResult<Vec<u8>> {
            Ok(format!("%PDF-1.4 stub {}", html.len()).into_bytes())
        }
    }

    /// Renderer whose browser never finishes
    struct HangingRenderer;

    #[async_trait]
    impl ReportRenderer for HangingRenderer {
        async fn render_pdf(&self, _html: &str) -> ReportResult<Vec<u8>> {
            Err(crate::report::ReportError::Timeout(60))
        }
    }

    fn create_test_app() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(CandidateStore::open(&dir.path().join("candidates.db")).unwrap());
        let state = AppState::with_renderer(store, Arc::new(StubRenderer), Config::default());
        (build_router(state), dir)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        app.clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_candidate(app: &Router) -> String {
        let response = send(app, "POST", "/api/candidates", None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: dto::CreateCandidateResponse = read_json(response).await;
        created.id
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _dir) = create_test_app();
        let response = send(&app, "GET", "/health/live", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _dir) = create_test_app();
        create_candidate(&app).await;

        let response = send(&app, "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let health: dto::HealthResponse = read_json(response).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.candidates, Some(1));
    }

    #[tokio::test]
    async fn test_list_candidates_empty() {
        let (app, _dir) = create_test_app();
        let response = send(&app, "GET", "/api/candidates", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let list: dto::CandidateListResponse = read_json(response).await;
        assert!(list.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_created_candidate_opens_with_empty_fields() {
        let (app, _dir) = create_test_app();
        let id = create_candidate(&app).await;
        assert!(id.starts_with("BW-"));

        let response = send(&app, "GET", &format!("/api/candidates/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = read_json(response).await;
        assert_eq!(json["id"], id.as_str());
        assert_eq!(json["consented"], false);
        assert!(json["consent_date"].is_null());
        assert_eq!(json["self_reflection"], "");
        assert_eq!(json["conclusion"], "");
        assert_eq!(json["notes"], "");
        assert_eq!(json["ratings"], serde_json::json!({}));

        let list: dto::CandidateListResponse =
            read_json(send(&app, "GET", "/api/candidates", None).await).await;
        assert_eq!(list.candidates.len(), 1);
        assert_eq!(list.candidates[0].id, id);
    }

    #[tokio::test]
    async fn test_update_all_ratings_completes_candidate() {
        let (app, _dir) = create_test_app();
        let id = create_candidate(&app).await;
        let uri = format!("/api/candidates/{}", id);

        let ratings: serde_json::Map<String, serde_json::Value> = Dimension::ALL
            .iter()
            .map(|d| (d.as_str().to_string(), serde_json::json!(4)))
            .collect();
        let body = serde_json::json!({ "ratings": ratings }).to_string();

        let response = send(&app, "PUT", &uri, Some(&body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let ack: dto::StatusResponse = read_json(response).await;
        assert_eq!(ack.status, "updated");

        let candidate: Candidate = read_json(send(&app, "GET", &uri, None).await).await;
        assert!(candidate.ratings.completeness().is_complete());
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_rating() {
        let (app, _dir) = create_test_app();
        let id = create_candidate(&app).await;
        let uri = format!("/api/candidates/{}", id);

        let response = send(&app, "PUT", &uri, Some(r#"{"ratings": {"teamwork": 6}}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error.code, "VALIDATION_ERROR");

        let response = send(&app, "PUT", &uri, Some(r#"{"ratings": {"charm": 3}}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_rejects_non_canonical_dimension_keys() {
        let (app, _dir) = create_test_app();
        let id = create_candidate(&app).await;
        let uri = format!("/api/candidates/{}", id);

        for body in [
            r#"{"ratings": {"Teamwork": 3}}"#,
            r#"{"ratings": {"PROBLEM-SOLVING": 4}}"#,
            r#"{"ratings": {"teamwork": 1, "Teamwork": 5}}"#,
        ] {
            let response = send(&app, "PUT", &uri, Some(body)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
            let error: ErrorResponse = read_json(response).await;
            assert_eq!(error.error.code, "VALIDATION_ERROR");
        }

        let candidate: Candidate = read_json(send(&app, "GET", &uri, None).await).await;
        assert!(candidate.ratings.is_empty());
    }

    #[tokio::test]
    async fn test_update_without_known_fields() {
        let (app, _dir) = create_test_app();
        let id = create_candidate(&app).await;
        let uri = format!("/api/candidates/{}", id);

        let response = send(&app, "PUT", &uri, Some(r#"{"shoe_size": 44}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, "PUT", &uri, Some("not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_unknown_candidate() {
        let (app, _dir) = create_test_app();
        let response = send(
            &app,
            "PUT",
            "/api/candidates/BW-1999-00000",
            Some(r#"{"notes": "x"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_consent_and_text_fields_persist() {
        let (app, _dir) = create_test_app();
        let id = create_candidate(&app).await;
        let uri = format!("/api/candidates/{}", id);

        let body = r#"{
            "consented": true,
            "consent_date": "2026-10-19T09:30:00Z",
            "self_reflection": "I tend to over-prepare",
            "star_notes": "S: migration, T: lead, A: planned, R: on time"
        }"#;
        assert_eq!(send(&app, "PUT", &uri, Some(body)).await.status(), StatusCode::OK);

        let json: serde_json::Value = read_json(send(&app, "GET", &uri, None).await).await;
        assert_eq!(json["consented"], true);
        assert_eq!(json["consent_date"], "2026-10-19T09:30:00Z");
        assert_eq!(json["self_reflection"], "I tend to over-prepare");
        assert!(json["star_notes"].as_str().unwrap().starts_with("S: migration"));
    }

    #[tokio::test]
    async fn test_delete_candidate() {
        let (app, _dir) = create_test_app();
        let id = create_candidate(&app).await;
        let uri = format!("/api/candidates/{}", id);

        let response = send(&app, "DELETE", &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let ack: dto::StatusResponse = read_json(response).await;
        assert_eq!(ack.status, "deleted");

        assert_eq!(send(&app, "GET", &uri, None).await.status(), StatusCode::NOT_FOUND);
        assert_eq!(send(&app, "DELETE", &uri, None).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_pdf() {
        let (app, _dir) = create_test_app();
        let id = create_candidate(&app).await;

        let response = send(&app, "POST", &format!("/api/candidates/{}/export", id), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            format!("attachment; filename=\"{}.pdf\"", id).as_str()
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_html() {
        let (app, _dir) = create_test_app();
        let id = create_candidate(&app).await;

        let response = send(
            &app,
            "POST",
            &format!("/api/candidates/{}/export?format=html", id),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains(&id));
        assert!(html.contains("0 of 7 dimensions rated"));
    }

    #[tokio::test]
    async fn test_export_unknown_candidate_and_format() {
        let (app, _dir) = create_test_app();
        let response = send(&app, "POST", "/api/candidates/BW-1999-00000/export", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let id = create_candidate(&app).await;
        let response = send(
            &app,
            "POST",
            &format!("/api/candidates/{}/export?format=docx", id),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_without_renderer_binary() {
        let dir = tempdir().unwrap();
        let store = Arc::new(CandidateStore::open(&dir.path().join("candidates.db")).unwrap());
        let mut config = Config::default();
        config.export.chromium_path = "/nonexistent/interviewer-chromium".to_string();
        let app = build_router(AppState::new(Arc::clone(&store), config));

        let id = store.create().await.unwrap().id;
        let response = send(&app, "POST", &format!("/api/candidates/{}/export", id), None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error.code, "REPORT_ERROR");
    }

    #[tokio::test]
    async fn test_export_renderer_timeout() {
        let dir = tempdir().unwrap();
        let store = Arc::new(CandidateStore::open(&dir.path().join("candidates.db")).unwrap());
        let state =
            AppState::with_renderer(Arc::clone(&store), Arc::new(HangingRenderer), Config::default());
        let app = build_router(state);

        let id = store.create().await.unwrap().id;
        let response = send(&app, "POST", &format!("/api/candidates/{}/export", id), None).await;
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.error.code, "REPORT_TIMEOUT");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let (app, _dir) = create_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/candidates")
                    .header("Origin", "http://localhost:8080")
                    .header("Access-Control-Request-Method", "PUT")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
