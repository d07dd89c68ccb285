//! Shared handler state.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use folio_db::service::FolioService;

/// One `FolioService` shared by all handlers.
///
/// The service owns a single libSQL connection, so handlers take the lock
/// for the whole operation and transactions never interleave.
#[derive(Clone)]
pub struct AppState {
    service: Arc<Mutex<FolioService>>,
    default_limit: u32,
}

impl AppState {
    #[must_use]
    pub fn new(service: FolioService, default_limit: u32) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
            default_limit,
        }
    }

    pub async fn service(&self) -> MutexGuard<'_, FolioService> {
        self.service.lock().await
    }

    /// Page size for list endpoints when the client gives none.
    #[must_use]
    pub const fn default_limit(&self) -> u32 {
        self.default_limit
    }
}
