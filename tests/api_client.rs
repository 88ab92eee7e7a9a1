//! End-to-end tests: a real server on an ephemeral port, driven by the
//! typed client.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::oneshot;

use interviewer::api::{serve_with_listener, AppState};
use interviewer::candidate::{Dimension, Rating};
use interviewer::client::{CandidateClient, ClientError, ExportFormat};
use interviewer::config::Config;
use interviewer::report::{ReportRenderer, ReportResult};
use interviewer::storage::CandidateStore;

struct EchoRenderer;

#[async_trait]
impl ReportRenderer for EchoRenderer {
    async fn render_pdf(&self, html: &str) -> ReportResult<Vec<u8>> {
        let mut pdf = b"%PDF-1.4\n".to_vec();
        pdf.extend_from_slice(html.as_bytes());
        Ok(pdf)
    }
}

struct TestServer {
    client: CandidateClient,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
    _dir: TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(CandidateStore::open(&dir.path().join("candidates.db")).unwrap());
        let state = AppState::with_renderer(store, Arc::new(EchoRenderer), Config::default());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            serve_with_listener(state, listener, async move {
                let _ = rx.await;
            })
            .await
            .unwrap();
        });

        Self {
            client: CandidateClient::new(format!("http://{}/api", addr)),
            shutdown: Some(tx),
            handle,
            _dir: dir,
        }
    }

    async fn stop(self) {
        let TestServer {
            client,
            shutdown,
            handle,
            _dir,
        } = self;
        drop(client);
        if let Some(tx) = shutdown {
            let _ = tx.send(());
        }
        tokio::time::timeout(Duration::from_secs(10), handle)
            .await
            .expect("server did not shut down")
            .unwrap();
    }
}

#[tokio::test]
async fn test_interview_lifecycle() {
    let server = TestServer::start().await;
    let client = &server.client;

    assert_eq!(client.status().await.unwrap(), "ok");
    assert!(client.list().await.unwrap().is_empty());

    let id = client.create().await.unwrap();
    assert!(id.starts_with("BW-"));

    let fresh = client.get(&id).await.unwrap();
    assert!(!fresh.consented);
    assert!(fresh.consent_date.is_none());
    assert!(fresh.self_reflection.is_empty());
    assert!(fresh.ratings.is_empty());
    assert!(fresh.conclusion.is_empty());

    client
        .update(
            &id,
            &json!({
                "consented": true,
                "consent_date": "2026-03-01T09:30:00Z",
                "self_reflection": "I organise my week around deadlines.",
            }),
        )
        .await
        .unwrap();

    let mut last = None;
    for (i, dimension) in Dimension::ALL.into_iter().enumerate() {
        let rating = Rating::new((i % 5) as i64 + 1).unwrap();
        last = Some(client.rate(&id, dimension, rating).await.unwrap());
    }
    let completeness = last.unwrap();
    assert!(completeness.is_complete());
    assert_eq!(completeness.message(), "All 7 dimensions rated");

    client
        .update(&id, &json!({ "conclusion": "Strong fit for the team." }))
        .await
        .unwrap();

    let candidate = client.get(&id).await.unwrap();
    assert!(candidate.consented);
    assert_eq!(candidate.self_reflection, "I organise my week around deadlines.");
    assert_eq!(candidate.ratings.len(), 7);
    assert_eq!(
        candidate.ratings.get(Dimension::Communication).map(|r| r.value()),
        Some(1)
    );
    assert_eq!(candidate.conclusion, "Strong fit for the team.");

    let summaries = client.list().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, id);
    assert!(summaries[0].consented);

    let html = client.export(&id, ExportFormat::Html).await.unwrap();
    let html = String::from_utf8(html).unwrap();
    assert!(html.contains(&id));
    assert!(html.contains("Strong fit for the team."));

    let pdf = client.export(&id, ExportFormat::Pdf).await.unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    client.delete(&id).await.unwrap();
    let err = client.get(&id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(client.list().await.unwrap().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_rejected_updates_surface_api_errors() {
    let server = TestServer::start().await;
    let client = &server.client;
    let id = client.create().await.unwrap();

    let err = client
        .update(&id, &json!({ "ratings": { "teamwork": 9 } }))
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, code, .. } => {
            assert_eq!(status, 400);
            assert_eq!(code, "VALIDATION_ERROR");
        }
        other => panic!("expected API error, got {:?}", other),
    }

    let err = client
        .update(&id, &json!({ "favourite_colour": "green" }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));

    let err = client
        .update("BW-1999-00000", &json!({ "notes": "x" }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));

    let err = client.delete("BW-1999-00000").await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    server.stop().await;
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CandidateClient::new(format!("http://{}/api", addr));
    let err = client.list().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
