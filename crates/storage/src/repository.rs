use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use survey_core::model::{Answer, PersonalInfo, SurveySession};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The durable subset of a survey session.
///
/// This is the explicit serialize/deserialize boundary: a pure value that a
/// session converts to and from, so persistence is testable without any
/// real backend. The fetched question list is deliberately excluded — it is
/// re-requested on every fresh load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: String,
    pub personal_info: Option<PersonalInfo>,
    pub answers: HashMap<String, Answer>,
    pub current_question_index: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub pin_number: Option<String>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn from_session(session: &SurveySession) -> Self {
        Self {
            session_id: session.session_id().to_owned(),
            personal_info: session.personal_info().cloned(),
            answers: session.answers().clone(),
            current_question_index: session.current_question_index(),
            started_at: session.started_at(),
            pin_number: session.pin_number().map(str::to_owned),
        }
    }

    /// Rehydrate a session. Questions start empty; the survey page fetches
    /// them before rendering.
    #[must_use]
    pub fn into_session(self) -> SurveySession {
        SurveySession::from_persisted(
            self.session_id,
            self.personal_info,
            self.answers,
            self.current_question_index,
            self.started_at,
            self.pin_number,
        )
    }
}

/// Repository contract for the single persisted session record.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Load the stored snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be read or decoded.
    async fn load(&self) -> Result<Option<SessionSnapshot>, StorageError>;

    /// Persist the snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError>;

    /// Remove the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be removed.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory repository for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    slot: Arc<Mutex<Option<SessionSnapshot>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn load(&self) -> Result<Option<SessionSnapshot>, StorageError> {
        let guard = self
            .slot
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(snapshot.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .slot
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            sessions: Arc::new(InMemoryRepository::new()),
        }
    }
}
