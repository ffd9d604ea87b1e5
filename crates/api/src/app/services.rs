use std::sync::Arc;

use pantry_auth::UserSession;
use pantry_infra::{Backend, DocumentStore, InventoryService};

/// Everything the handlers need, shared behind an `Arc`.
#[derive(Clone)]
pub struct AppServices {
    backend: Arc<Backend>,
}

impl AppServices {
    pub fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }

    /// Fresh in-memory services (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(Backend::in_memory()))
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn inventory(&self, session: &UserSession) -> InventoryService<Arc<dyn DocumentStore>> {
        self.backend.inventory(session)
    }
}
