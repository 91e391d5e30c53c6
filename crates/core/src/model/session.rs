use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::answer::{Answer, AnswerValue};
use super::personal_info::PersonalInfo;
use super::question::Question;

/// The single mutable record for one respondent's survey attempt.
///
/// Pages read and write exclusively through this type; nothing else keeps
/// an independent copy of its fields. Progress and completion are derived
/// on every read, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveySession {
    session_id: String,
    personal_info: Option<PersonalInfo>,
    questions: Vec<Question>,
    answers: HashMap<String, Answer>,
    current_question_index: usize,
    started_at: Option<DateTime<Utc>>,
    pin_number: Option<String>,
}

impl Default for SurveySession {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveySession {
    /// A fresh, empty session with a newly generated id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            personal_info: None,
            questions: Vec::new(),
            answers: HashMap::new(),
            current_question_index: 0,
            started_at: None,
            pin_number: None,
        }
    }

    /// Rehydrates a session from its persisted subset. The question list is
    /// deliberately not part of the durable record and starts out empty; the
    /// survey page re-fetches it before rendering.
    #[must_use]
    pub fn from_persisted(
        session_id: String,
        personal_info: Option<PersonalInfo>,
        answers: HashMap<String, Answer>,
        current_question_index: usize,
        started_at: Option<DateTime<Utc>>,
        pin_number: Option<String>,
    ) -> Self {
        Self {
            session_id,
            personal_info,
            questions: Vec::new(),
            answers,
            current_question_index,
            started_at,
            pin_number,
        }
    }

    /// Replaces the stored personal info wholesale, stamping `saved_at`.
    pub fn set_personal_info(&mut self, mut info: PersonalInfo, now: DateTime<Utc>) {
        info.saved_at = Some(now);
        self.personal_info = Some(info);
    }

    /// Replaces the question list wholesale.
    ///
    /// Answers whose question id appears in the new list are kept, so a
    /// resumed session regains its progress once questions are re-fetched.
    /// Answers keyed by ids absent from the new list are pruned rather than
    /// left orphaned (a locale switch may ship a disjoint id space).
    pub fn set_questions(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        let known: std::collections::HashSet<&str> =
            self.questions.iter().map(|q| q.id.as_str()).collect();
        self.answers.retain(|id, _| known.contains(id.as_str()));
    }

    /// Inserts or overwrites the answer for `question_id`, stamping
    /// `answered_at`. Last write wins; no history is kept. Value shape is
    /// the caller's responsibility (`AnswerValue::matches_question`).
    pub fn set_answer(
        &mut self,
        question_id: impl Into<String>,
        value: AnswerValue,
        now: DateTime<Utc>,
    ) {
        let question_id = question_id.into();
        self.answers.insert(
            question_id.clone(),
            Answer::new(question_id, value, now),
        );
    }

    /// Unchecked set; keeping the index within `0..questions.len()` is the
    /// caller's job.
    pub fn set_current_question_index(&mut self, index: usize) {
        self.current_question_index = index;
    }

    pub fn set_started_at(&mut self, at: DateTime<Utc>) {
        self.started_at = Some(at);
    }

    pub fn set_pin_number(&mut self, pin: impl Into<String>) {
        self.pin_number = Some(pin.into());
    }

    /// Clears everything and regenerates the session id. All-or-nothing;
    /// there is no partial reset.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Percentage of questions answered, 0 when no questions are loaded.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.answers.len() as f64 / self.questions.len() as f64 * 100.0
        }
    }

    /// True iff questions are loaded and every one of them has an answer.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        !self.questions.is_empty()
            && self
                .questions
                .iter()
                .all(|question| self.answers.contains_key(&question.id))
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub fn personal_info(&self) -> Option<&PersonalInfo> {
        self.personal_info.as_ref()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn answers(&self) -> &HashMap<String, Answer> {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn pin_number(&self) -> Option<&str> {
        self.pin_number.as_deref()
    }
}
