use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::question::{OptionValue, Question, QuestionType};

/// The value of one answer.
///
/// The variant must match the referenced question's type: yes/no questions
/// carry a `Bool`, scale and rating carry an `Integer` within the question's
/// bounds, text carries `Text`, single choice carries the chosen option's
/// value, multiple choice carries `Many`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Integer(i64),
    Text(String),
    Many(Vec<OptionValue>),
}

impl AnswerValue {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_many(&self) -> Option<&[OptionValue]> {
        match self {
            Self::Many(values) => Some(values),
            _ => None,
        }
    }

    /// Checks the shape invariant between this value and a question.
    ///
    /// The session store itself never validates; callers use this at the
    /// point where an answer is committed.
    #[must_use]
    pub fn matches_question(&self, question: &Question) -> bool {
        match question.kind {
            QuestionType::YesNo => matches!(self, Self::Bool(_)),
            QuestionType::Text => matches!(self, Self::Text(_)),
            QuestionType::MultipleChoice => matches!(self, Self::Many(_)),
            QuestionType::SingleChoice => {
                matches!(self, Self::Integer(_) | Self::Text(_))
            }
            QuestionType::Scale | QuestionType::Rating => {
                let (min, max) = question.scale_bounds();
                self.as_integer()
                    .is_some_and(|value| value >= min && value <= max)
            }
        }
    }
}

impl From<OptionValue> for AnswerValue {
    fn from(value: OptionValue) -> Self {
        match value {
            OptionValue::Number(n) => Self::Integer(n),
            OptionValue::Text(s) => Self::Text(s),
        }
    }
}

/// One committed answer. Keyed by question id in the session; re-answering
/// replaces the previous value (last-write-wins, no history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub value: AnswerValue,
    pub answered_at: DateTime<Utc>,
}

impl Answer {
    #[must_use]
    pub fn new(
        question_id: impl Into<String>,
        value: AnswerValue,
        answered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            value,
            answered_at,
        }
    }
}
