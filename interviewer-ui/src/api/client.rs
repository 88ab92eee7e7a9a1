//! HTTP API Client
//!
//! Functions for communicating with the interviewer REST API.

use gloo_net::http::{Request, Response};
use serde_json::Value;
use wasm_bindgen::JsCast;

use crate::state::candidate::{Candidate, CandidateSummary};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

const API_URL_KEY: &str = "interviewer_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url.trim());
        }
    }
}

fn candidate_url(id: &str) -> String {
    format!(
        "{}/candidates/{}",
        get_api_base(),
        String::from(js_sys::encode_uri_component(id))
    )
}

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateSummary>,
}

#[derive(Debug, serde::Deserialize)]
pub struct CreatedCandidate {
    pub id: String,
    pub created_at: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

async fn check(response: Response, fallback: &str) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }

    let message = response
        .json::<ApiError>()
        .await
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("{} ({})", fallback, response.status()));
    Err(message)
}

// ============ API Functions ============

/// Fetch all candidates
pub async fn fetch_candidates() -> Result<Vec<CandidateSummary>, String> {
    let response = Request::get(&format!("{}/candidates", get_api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    let result: CandidateListResponse = check(response, "Failed to load candidates")
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.candidates)
}

/// Create a new candidate
pub async fn create_candidate() -> Result<CreatedCandidate, String> {
    let response = Request::post(&format!("{}/candidates", get_api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response, "Failed to create candidate")
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch one candidate
pub async fn fetch_candidate(id: &str) -> Result<Candidate, String> {
    let response = Request::get(&candidate_url(id))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response, "Failed to load candidate")
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Update fields of a candidate
pub async fn update_candidate(id: &str, body: &Value) -> Result<(), String> {
    let response = Request::put(&candidate_url(id))
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response, "Save failed").await?;
    Ok(())
}

/// Delete a candidate
pub async fn delete_candidate(id: &str) -> Result<(), String> {
    let response = Request::delete(&candidate_url(id))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response, "Delete failed").await?;
    Ok(())
}

/// Render the evaluation PDF
pub async fn export_pdf(id: &str) -> Result<Vec<u8>, String> {
    let response = Request::post(&format!("{}/export", candidate_url(id)))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check(response, "Export failed")
        .await?
        .binary()
        .await
        .map_err(|e| format!("Read error: {}", e))
}

/// Check the API is reachable
pub async fn check_status() -> Result<String, String> {
    let response = Request::get(&format!("{}/status", get_api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    let status: StatusResponse = check(response, "API is not reachable")
        .await?
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(status.status)
}

/// Offer `bytes` to the user as a file download
pub fn download_file(filename: &str, mime: &str, bytes: &[u8]) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("Blob error: {:?}", e))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("URL error: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("DOM error: {:?}", e))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Not an anchor element".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}
