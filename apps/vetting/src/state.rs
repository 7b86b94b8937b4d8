use std::sync::Arc;

use crate::config::Config;
use crate::vetting::runner::PipelineRunner;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Extractor, sink and weights, shared read-only across requests.
    pub runner: Arc<PipelineRunner>,
    pub config: Config,
}
