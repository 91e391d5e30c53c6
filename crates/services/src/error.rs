//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SurveyGateway`.
///
/// The three live-mode failure kinds: transport (`Network`), a non-2xx or
/// backend-rejected response (`Http`/`Backend`), and a body that matches no
/// accepted schema (`Shape`). The gateway never retries; callers decide.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request failed with status {status}")]
    Http { status: reqwest::StatusCode },

    #[error("{message}")]
    Backend { message: String },

    #[error("invalid response format")]
    Shape,
}

impl GatewayError {
    /// The backend-provided message, when the backend rejected the request
    /// with one. Used for user-visible submit failures.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend { message } => Some(message),
            _ => None,
        }
    }
}

/// Errors emitted by `SessionStoreService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}
