//! Composition root for the service layer.

use std::sync::Arc;

use storage::repository::Storage;
use survey_core::Clock;
use tracing::info;

use crate::error::AppServicesError;
use crate::gateway::SurveyGateway;
use crate::session_store_service::SessionStoreService;

/// Everything the UI needs, built once at startup and shared via `Arc`.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<SessionStoreService>,
    gateway: Arc<SurveyGateway>,
    clock: Clock,
}

impl AppServices {
    /// Wires the services on top of a `SQLite` file.
    pub async fn new_sqlite(
        database_url: &str,
        gateway: SurveyGateway,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(database_url).await?;
        info!(database_url, "session storage ready");
        Self::with_storage(storage, gateway, clock).await
    }

    /// Wires the services on top of any storage backend. Tests use this
    /// with `Storage::in_memory()`.
    pub async fn with_storage(
        storage: Storage,
        gateway: SurveyGateway,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let store = SessionStoreService::load_or_create(storage.sessions, clock).await?;
        Ok(Self {
            store: Arc::new(store),
            gateway: Arc::new(gateway),
            clock,
        })
    }

    #[must_use]
    pub fn store(&self) -> &Arc<SessionStoreService> {
        &self.store
    }

    #[must_use]
    pub fn gateway(&self) -> &Arc<SurveyGateway> {
        &self.gateway
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}
