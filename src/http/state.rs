//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::PostRepository;
use crate::services::PostService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service instance for business operations
    pub service: Arc<dyn PostService>,
    /// Repository handle, used directly only by the health probe
    pub repository: Arc<dyn PostRepository>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(service: Arc<dyn PostService>, repository: Arc<dyn PostRepository>) -> Self {
        Self {
            service,
            repository,
        }
    }
}
