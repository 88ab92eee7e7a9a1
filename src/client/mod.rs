//! HTTP API Client
//!
//! Typed wrapper over the candidate REST API, used by the CLI. One call per
//! endpoint; no retries and no caching.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::api::dto::{CandidateListResponse, CreateCandidateResponse, StatusResponse};
use crate::api::error::ErrorResponse;
use crate::candidate::{Candidate, CandidateSummary, Completeness, Dimension, Rating};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Errors returned by [`CandidateClient`]
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}) {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

impl ClientError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Report formats offered by the export endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Html,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
        }
    }
}

/// Client for the candidate REST API
#[derive(Debug, Clone)]
pub struct CandidateClient {
    http: reqwest::Client,
    base_url: String,
}

impl CandidateClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn candidate_url(&self, id: &str) -> String {
        format!("{}/candidates/{}", self.base_url, urlencoding::encode(id))
    }

    /// GET /candidates
    pub async fn list(&self) -> ClientResult<Vec<CandidateSummary>> {
        let response = self
            .http
            .get(format!("{}/candidates", self.base_url))
            .send()
            .await?;
        let list: CandidateListResponse = decode(response).await?;
        Ok(list.candidates)
    }

    /// POST /candidates, returns the new id
    pub async fn create(&self) -> ClientResult<String> {
        let response = self
            .http
            .post(format!("{}/candidates", self.base_url))
            .send()
            .await?;
        let created: CreateCandidateResponse = decode(response).await?;
        Ok(created.id)
    }

    /// GET /candidates/:id
    pub async fn get(&self, id: &str) -> ClientResult<Candidate> {
        let response = self.http.get(self.candidate_url(id)).send().await?;
        decode(response).await
    }

    /// PUT /candidates/:id with a partial body keyed by field name
    pub async fn update(&self, id: &str, fields: &Value) -> ClientResult<()> {
        let response = self
            .http
            .put(self.candidate_url(id))
            .json(fields)
            .send()
            .await?;
        let _: StatusResponse = decode(response).await?;
        Ok(())
    }

    /// Set one rating, keeping the others
    ///
    /// The API replaces the whole ratings map, so this reads the record first.
    pub async fn rate(
        &self,
        id: &str,
        dimension: Dimension,
        rating: Rating,
    ) -> ClientResult<Completeness> {
        let mut ratings = self.get(id).await?.ratings;
        ratings.set(dimension, rating);

        self.update(id, &serde_json::json!({ "ratings": ratings }))
            .await?;
        Ok(ratings.completeness())
    }

    /// DELETE /candidates/:id
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let response = self.http.delete(self.candidate_url(id)).send().await?;
        let _: StatusResponse = decode(response).await?;
        Ok(())
    }

    /// POST /candidates/:id/export, returns the report bytes
    pub async fn export(&self, id: &str, format: ExportFormat) -> ClientResult<Vec<u8>> {
        let response = self
            .http
            .post(format!("{}/export", self.candidate_url(id)))
            .query(&[("format", format.as_str())])
            .send()
            .await?;

        let response = check(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// GET /status
    pub async fn status(&self) -> ClientResult<String> {
        let response = self
            .http
            .get(format!("{}/status", self.base_url))
            .send()
            .await?;
        let status: StatusResponse = decode(response).await?;
        Ok(status.status)
    }
}

/// Turn non-2xx responses into [`ClientError::Api`]
async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => (body.error.code, body.error.message),
        Err(_) => ("UNKNOWN".to_string(), text),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    Ok(check(response).await?.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let client = CandidateClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_candidate_url_encodes_id() {
        let client = CandidateClient::new(DEFAULT_API_BASE);
        assert_eq!(
            client.candidate_url("BW-2026-00001"),
            "http://localhost:5000/api/candidates/BW-2026-00001"
        );
        assert_eq!(
            client.candidate_url("a/b c"),
            "http://localhost:5000/api/candidates/a%2Fb%20c"
        );
    }

    #[test]
    fn test_api_error_status() {
        let err = ClientError::Api {
            status: 404,
            code: "NOT_FOUND".to_string(),
            message: "Candidate x not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "API error (404) NOT_FOUND: Candidate x not found"
        );
    }
}
