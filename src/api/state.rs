//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::report::{ChromiumRenderer, ReportRenderer};
use crate::storage::CandidateStore;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Candidate database
    pub store: Arc<CandidateStore>,
    /// Prints evaluation reports to PDF
    pub renderer: Arc<dyn ReportRenderer>,
    /// Server configuration
    pub config: Arc<Config>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state with the Chromium renderer described by `config.export`
    pub fn new(store: Arc<CandidateStore>, config: Config) -> Self {
        let renderer = ChromiumRenderer::new(
            config.export.chromium_path.clone(),
            config.export.timeout(),
        );
        Self::with_renderer(store, Arc::new(renderer), config)
    }

    /// Create state with a custom report renderer
    pub fn with_renderer(
        store: Arc<CandidateStore>,
        renderer: Arc<dyn ReportRenderer>,
        config: Config,
    ) -> Self {
        Self {
            store,
            renderer,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.api.request_timeout_secs)
    }
}
