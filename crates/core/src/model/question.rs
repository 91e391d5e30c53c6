use serde::{Deserialize, Serialize};

/// The input modality of a question.
///
/// Auto-advance types commit the answer and move on as soon as a value is
/// selected; manual-advance types wait for an explicit "next".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    Text,
    Scale,
    Rating,
    YesNo,
}

impl QuestionType {
    /// Whether selecting a value should advance to the next question on its
    /// own, without an explicit "next" action.
    #[must_use]
    pub fn is_auto_advance(self) -> bool {
        matches!(
            self,
            Self::SingleChoice | Self::Scale | Self::Rating | Self::YesNo
        )
    }

    /// All known question types, in no particular order.
    pub const ALL: [QuestionType; 6] = [
        Self::SingleChoice,
        Self::MultipleChoice,
        Self::Text,
        Self::Scale,
        Self::Rating,
        Self::YesNo,
    ];
}

/// The value attached to a choice option: backends send either a number or a
/// short string token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(i64),
    Text(String),
}

/// One selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    pub value: OptionValue,
}

/// A single survey question as fetched from the backend.
///
/// Passive data: immutable once fetched, owned by the session for the
/// duration of one survey attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub category: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
    pub required: bool,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
}

impl Question {
    /// Inclusive bounds for scale-like questions, defaulting to 1..=5 when
    /// the backend omits them.
    #[must_use]
    pub fn scale_bounds(&self) -> (i64, i64) {
        (self.min_value.unwrap_or(1), self.max_value.unwrap_or(5))
    }
}
