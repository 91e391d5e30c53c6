use std::sync::Arc;

use services::{Clock, SessionStoreService, SurveyGateway};

/// What the composition root must provide before the UI can launch.
pub trait UiApp: Send + Sync {
    fn store(&self) -> Arc<SessionStoreService>;
    fn gateway(&self) -> Arc<SurveyGateway>;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    store: Arc<SessionStoreService>,
    gateway: Arc<SurveyGateway>,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            store: app.store(),
            gateway: app.gateway(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn store(&self) -> Arc<SessionStoreService> {
        Arc::clone(&self.store)
    }

    #[must_use]
    pub fn gateway(&self) -> Arc<SurveyGateway> {
        Arc::clone(&self.gateway)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
