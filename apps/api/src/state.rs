use std::sync::Arc;

use crate::analysis::classifier::Classifier;
use crate::config::Config;
use crate::llm_client::ChatModel;
use crate::patterns::PatternStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub patterns: Arc<PatternStore>,
    pub classifier: Arc<Classifier>,
    /// Upstream model. `None` when no API key is configured: analysis runs
    /// fallback-only and chat reports 503.
    pub llm: Option<Arc<dyn ChatModel>>,
}
