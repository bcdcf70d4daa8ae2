use std::sync::Arc;

use crate::companies::CompanyProvider;
use crate::llm_client::CompletionService;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<dyn CompanyProvider>,
    /// Production: `LlmClient`. Tests swap in stubs.
    pub completion: Arc<dyn CompletionService>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        companies: Arc<dyn CompanyProvider>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self {
            companies,
            completion,
            sessions: SessionStore::default(),
        }
    }
}
