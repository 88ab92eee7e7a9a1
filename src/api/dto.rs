//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::candidate::CandidateSummary;

// ============================================
// CANDIDATE DTOs
// ============================================

/// List candidates response
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateSummary>,
}

/// Create candidate response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCandidateResponse {
    pub id: String,
    pub created_at: String,
}

/// Acknowledgement for updates and deletes
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    /// "updated", "deleted" or "ok"
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

// ============================================
// EXPORT DTOs
// ============================================

/// Export query parameters
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Format: pdf or html
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "pdf".to_string()
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Storage status
    pub storage: String,
    /// Number of stored candidates, when storage is reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<u64>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
