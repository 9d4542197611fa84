//! Application state for dependency injection.

use std::sync::Arc;

use crate::infra::BackendClient;

/// Application state shared across handlers.
///
/// Immutable after startup; cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Backend the handlers delegate to
    pub backend: Arc<dyn BackendClient>,
}

impl AppState {
    /// Create new app state.
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        Self { backend }
    }
}
