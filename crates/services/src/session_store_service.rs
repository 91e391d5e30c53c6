//! The single source of truth for the in-flight survey session.
//!
//! Owns the `SurveySession` behind a mutex and writes every durable
//! mutation through to the repository. Pages read cloned views; nothing
//! outside this service holds session state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use storage::repository::{SessionRepository, SessionSnapshot};
use survey_core::Clock;
use survey_core::model::{Answer, AnswerValue, PersonalInfo, Question, SurveySession};

use crate::error::SessionStoreError;
use crate::gateway::SurveySubmitRequest;

pub struct SessionStoreService {
    session: Mutex<SurveySession>,
    repo: Arc<dyn SessionRepository>,
    clock: Clock,
}

impl SessionStoreService {
    /// Restores the persisted session, or starts a fresh one when nothing
    /// is stored.
    pub async fn load_or_create(
        repo: Arc<dyn SessionRepository>,
        clock: Clock,
    ) -> Result<Self, SessionStoreError> {
        let session = match repo.load().await? {
            Some(snapshot) => snapshot.into_session(),
            None => SurveySession::new(),
        };
        Ok(Self {
            session: Mutex::new(session),
            repo,
            clock,
        })
    }

    // A poisoned lock only means a panic mid-read elsewhere; the session
    // itself is never left half-mutated, so recover the guard.
    fn lock(&self) -> MutexGuard<'_, SurveySession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn persist(&self) -> Result<(), SessionStoreError> {
        let snapshot = SessionSnapshot::from_session(&self.lock());
        self.repo.save(&snapshot).await?;
        Ok(())
    }

    /// Replaces the respondent's personal info and persists.
    pub async fn set_personal_info(&self, info: PersonalInfo) -> Result<(), SessionStoreError> {
        self.lock().set_personal_info(info, self.clock.now());
        self.persist().await
    }

    /// Replaces the question list in memory only. Questions are re-fetched
    /// on every fresh load, so they never touch the repository.
    pub fn set_questions(&self, questions: Vec<Question>) {
        self.lock().set_questions(questions);
    }

    /// Records (or overwrites) an answer and persists.
    pub async fn set_answer(
        &self,
        question_id: impl Into<String>,
        value: AnswerValue,
    ) -> Result<(), SessionStoreError> {
        self.lock().set_answer(question_id, value, self.clock.now());
        self.persist().await
    }

    /// Moves the cursor and persists, so a reload resumes at the same spot.
    pub async fn set_current_question_index(&self, index: usize) -> Result<(), SessionStoreError> {
        self.lock().set_current_question_index(index);
        self.persist().await
    }

    /// Stamps `started_at` on the first call; later calls are no-ops.
    pub async fn mark_started(&self) -> Result<(), SessionStoreError> {
        {
            let mut session = self.lock();
            if session.started_at().is_some() {
                return Ok(());
            }
            session.set_started_at(self.clock.now());
        }
        self.persist().await
    }

    pub async fn set_pin_number(
        &self,
        pin: impl Into<String>,
    ) -> Result<(), SessionStoreError> {
        self.lock().set_pin_number(pin);
        self.persist().await
    }

    /// Wipes the session, rotates its id, and persists the fresh state.
    pub async fn reset_survey(&self) -> Result<(), SessionStoreError> {
        self.lock().reset();
        self.persist().await
    }

    #[must_use]
    pub fn session_id(&self) -> String {
        self.lock().session_id().to_owned()
    }

    #[must_use]
    pub fn personal_info(&self) -> Option<PersonalInfo> {
        self.lock().personal_info().cloned()
    }

    #[must_use]
    pub fn questions(&self) -> Vec<Question> {
        self.lock().questions().to_vec()
    }

    #[must_use]
    pub fn question_at(&self, index: usize) -> Option<Question> {
        self.lock().question_at(index).cloned()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.lock().questions().len()
    }

    #[must_use]
    pub fn answer_for(&self, question_id: &str) -> Option<Answer> {
        self.lock().answer_for(question_id).cloned()
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.lock().current_question_index()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.lock().started_at()
    }

    #[must_use]
    pub fn pin_number(&self) -> Option<String> {
        self.lock().pin_number().map(str::to_owned)
    }

    /// Percentage of loaded questions answered, 0 before questions arrive.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.lock().progress()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.lock().is_completed()
    }

    /// Assembles the submit payload, or `None` while personal info is
    /// missing.
    #[must_use]
    pub fn build_submit_request(
        &self,
        completed_at: DateTime<Utc>,
    ) -> Option<SurveySubmitRequest> {
        let session = self.lock();
        let personal_info = session.personal_info()?.clone();
        let mut answers: Vec<Answer> = session.answers().values().cloned().collect();
        answers.sort_by(|a, b| a.question_id.cmp(&b.question_id));
        Some(SurveySubmitRequest {
            session_id: session.session_id().to_owned(),
            personal_info,
            answers,
            completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use survey_core::model::{Gender, QuestionType};
    use survey_core::time::{fixed_clock, fixed_now};

    fn question(id: &str) -> Question {
        Question {
            id: id.into(),
            kind: QuestionType::YesNo,
            category: "general".into(),
            title: format!("Question {id}"),
            description: None,
            options: Vec::new(),
            required: true,
            order: 1,
            min_value: None,
            max_value: None,
        }
    }

    async fn service_with(repo: InMemoryRepository) -> SessionStoreService {
        SessionStoreService::load_or_create(Arc::new(repo), fixed_clock())
            .await
            .expect("load_or_create")
    }

    #[tokio::test]
    async fn durable_mutations_write_through() {
        let repo = InMemoryRepository::new();
        let service = service_with(repo.clone()).await;

        service
            .set_personal_info(PersonalInfo::new("a@b.com", "Kim", "60s", Gender::Male))
            .await
            .unwrap();
        service
            .set_answer("q1", AnswerValue::Bool(true))
            .await
            .unwrap();
        service.set_current_question_index(1).await.unwrap();
        service.mark_started().await.unwrap();

        let stored = repo.load().await.unwrap().expect("snapshot saved");
        assert_eq!(stored.session_id, service.session_id());
        assert_eq!(stored.answers.len(), 1);
        assert_eq!(stored.current_question_index, 1);
        assert_eq!(stored.started_at, Some(fixed_now()));
        assert_eq!(
            stored.personal_info.as_ref().map(|i| i.saved_at),
            Some(Some(fixed_now()))
        );
    }

    #[tokio::test]
    async fn restore_resumes_the_previous_attempt() {
        let repo = InMemoryRepository::new();
        {
            let service = service_with(repo.clone()).await;
            service
                .set_personal_info(PersonalInfo::new("a@b.com", "Kim", "60s", Gender::Male))
                .await
                .unwrap();
            service.set_answer("q1", AnswerValue::Bool(true)).await.unwrap();
            service.set_current_question_index(1).await.unwrap();
        }

        let restored = service_with(repo).await;
        assert!(restored.personal_info().is_some());
        assert_eq!(restored.current_question_index(), 1);
        assert!(restored.answer_for("q1").is_some());
        // Questions are not persisted; progress waits for the re-fetch.
        assert!(restored.questions().is_empty());
        assert_eq!(restored.progress(), 0.0);

        restored.set_questions(vec![question("q1"), question("q2")]);
        assert_eq!(restored.progress(), 50.0);
    }

    #[tokio::test]
    async fn mark_started_stamps_only_once() {
        let service = service_with(InMemoryRepository::new()).await;
        service.mark_started().await.unwrap();
        let first = service.started_at();
        service.mark_started().await.unwrap();
        assert_eq!(service.started_at(), first);
    }

    #[tokio::test]
    async fn reset_rotates_id_and_persists_fresh_state() {
        let repo = InMemoryRepository::new();
        let service = service_with(repo.clone()).await;
        let old_id = service.session_id();
        service.set_answer("q1", AnswerValue::Bool(true)).await.unwrap();
        service.set_pin_number("123456").await.unwrap();

        service.reset_survey().await.unwrap();

        assert_ne!(service.session_id(), old_id);
        assert!(service.pin_number().is_none());
        let stored = repo.load().await.unwrap().expect("snapshot saved");
        assert_eq!(stored.session_id, service.session_id());
        assert!(stored.answers.is_empty());
        assert!(stored.pin_number.is_none());
    }

    #[tokio::test]
    async fn submit_request_requires_personal_info() {
        let service = service_with(InMemoryRepository::new()).await;
        assert!(service.build_submit_request(fixed_now()).is_none());

        service
            .set_personal_info(PersonalInfo::new("a@b.com", "Kim", "60s", Gender::Male))
            .await
            .unwrap();
        service.set_answer("q2", AnswerValue::Bool(false)).await.unwrap();
        service.set_answer("q1", AnswerValue::Bool(true)).await.unwrap();

        let request = service.build_submit_request(fixed_now()).expect("request");
        assert_eq!(request.session_id, service.session_id());
        assert_eq!(request.completed_at, fixed_now());
        let ids: Vec<&str> = request.answers.iter().map(|a| a.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2"]);
    }
}
