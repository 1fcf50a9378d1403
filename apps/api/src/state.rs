use std::sync::Arc;

use crate::config::Config;
use crate::github::RepositorySource;
use crate::llm_client::TextGenerator;
use crate::store::PortfolioStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every collaborator sits behind a trait object so handlers can be exercised
/// against in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn TextGenerator>,
    pub github: Arc<dyn RepositorySource>,
    pub store: Arc<dyn PortfolioStore>,
    pub config: Config,
}
