//! # Interviewer
//!
//! Structured candidate interviews: a four-step wizard (consent,
//! self-reflection, seven-dimension rating, conclusion) backed by a small
//! REST API, with PDF evaluation reports.
//!
//! ## Modules
//!
//! - [`candidate`]: the interview record, rating scale and partial updates
//! - [`storage`]: SQLite persistence
//! - [`report`]: HTML report and PDF rendering
//! - [`api`]: REST API server with Axum
//! - [`client`]: typed HTTP client for the API
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use interviewer::candidate::{CandidateUpdate, FieldUpdate, TextField};
//! use interviewer::storage::CandidateStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = CandidateStore::open("candidates.db".as_ref())?;
//!
//!     let candidate = store.create().await?;
//!     let update = CandidateUpdate::new()
//!         .with(FieldUpdate::Text(TextField::Notes, "Punctual, well prepared".into()));
//!     store.update(&candidate.id, &update).await?;
//!
//!     println!("{} candidates on file", store.count().await?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod candidate;
pub mod client;
pub mod config;
pub mod logging;
pub mod report;
pub mod storage;

pub use api::{build_router, serve, ApiError, AppState};

pub use candidate::{
    Candidate, CandidateSummary, CandidateUpdate, Completeness, Dimension, FieldUpdate, Rating,
    Ratings, TextField, UpdateError,
};

pub use client::{CandidateClient, ClientError, ExportFormat};

pub use config::{ApiConfig, Config, ConfigError, ExportConfig, LoggingConfig, StorageConfig};

pub use report::{build_report_html, ChromiumRenderer, ReportError, ReportRenderer};

pub use storage::{CandidateStore, StorageError, StorageResult};
