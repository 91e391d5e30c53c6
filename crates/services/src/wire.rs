//! Backend wire shapes and their normalization into the domain model.
//!
//! The question endpoint is served in three historical shapes: a wrapped
//! `{"questions": [...]}` object, a bare array, and an envelope whose items
//! carry a different field set entirely. All three normalize to `Question`;
//! anything else is a `Shape` error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use survey_core::model::{Question, QuestionType};

use crate::error::GatewayError;
use crate::gateway::SurveySubmitRequest;

/// Every accepted body of the question-list endpoint.
///
/// Untagged, so variant order matters: the envelope is keyed by `isSuccess`,
/// the wrapped form by `questions`, and the bare array catches the rest.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum QuestionsBody {
    Envelope(QuestionsEnvelope),
    Wrapped { questions: Vec<Question> },
    Bare(Vec<Question>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionsEnvelope {
    pub is_success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<QuestionsResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsResult {
    pub questions: Vec<BackendQuestion>,
}

/// Item shape of the envelope variant. These are yes/no screening questions
/// with numeric ids and a grading criterion instead of a description.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BackendQuestion {
    pub id: i64,
    pub question_text: String,
    #[serde(default)]
    pub criterion: Option<String>,
}

pub(crate) fn normalize_questions(body: QuestionsBody) -> Result<Vec<Question>, GatewayError> {
    match body {
        QuestionsBody::Wrapped { questions } | QuestionsBody::Bare(questions) => Ok(questions),
        QuestionsBody::Envelope(envelope) => {
            if !envelope.is_success {
                return Err(GatewayError::Backend {
                    message: envelope
                        .message
                        .unwrap_or_else(|| "question fetch rejected".into()),
                });
            }
            let result = envelope.result.ok_or(GatewayError::Shape)?;
            Ok(result
                .questions
                .into_iter()
                .enumerate()
                .map(|(index, raw)| backend_question(index, raw))
                .collect())
        }
    }
}

fn backend_question(index: usize, raw: BackendQuestion) -> Question {
    Question {
        id: raw.id.to_string(),
        kind: QuestionType::YesNo,
        category: "general".into(),
        title: raw.question_text,
        description: raw.criterion.filter(|c| !c.is_empty()),
        options: Vec::new(),
        required: true,
        order: u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1),
        min_value: None,
        max_value: None,
    }
}

/// Submit payload. `survey_answers` is keyed by the numeric question id; a
/// `BTreeMap` keeps the serialized order stable.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitBody {
    pub email: String,
    pub name: String,
    pub gender: String,
    pub age_group: String,
    pub survey_answers: BTreeMap<i64, bool>,
}

/// Flattens a submit request into the backend payload. Answers whose id is
/// not numeric, or whose value is not a boolean, cannot be expressed in this
/// payload and are dropped with a warning.
pub(crate) fn submit_body(request: &SurveySubmitRequest) -> SubmitBody {
    let mut survey_answers = BTreeMap::new();
    for answer in &request.answers {
        let Ok(id) = answer.question_id.parse::<i64>() else {
            warn!(
                question_id = %answer.question_id,
                "dropping answer with non-numeric question id from submit payload"
            );
            continue;
        };
        let Some(value) = answer.value.as_bool() else {
            warn!(
                question_id = %answer.question_id,
                "dropping non-boolean answer from submit payload"
            );
            continue;
        };
        survey_answers.insert(id, value);
    }

    SubmitBody {
        email: request.personal_info.email.clone(),
        name: request.personal_info.name.clone(),
        gender: request.personal_info.gender.as_upper().to_string(),
        age_group: request.personal_info.age_group.clone(),
        survey_answers,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitEnvelope {
    pub is_success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<SubmitResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResult {
    pub pin: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::model::{Answer, AnswerValue, Gender, PersonalInfo};
    use survey_core::time::fixed_now;

    fn parse(json: &str) -> Result<Vec<Question>, GatewayError> {
        let body: QuestionsBody = serde_json::from_str(json).map_err(|_| GatewayError::Shape)?;
        normalize_questions(body)
    }

    #[test]
    fn wrapped_shape_passes_through() {
        let json = r#"{"questions": [{
            "id": "q_001", "type": "yes_no", "category": "general",
            "title": "Do you exercise?", "required": true, "order": 1
        }]}"#;
        let questions = parse(json).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "q_001");
    }

    #[test]
    fn bare_array_passes_through() {
        let json = r#"[{
            "id": "q_001", "type": "text", "category": "general",
            "title": "Anything else?", "required": false, "order": 1
        }]"#;
        let questions = parse(json).unwrap();
        assert_eq!(questions[0].kind, QuestionType::Text);
    }

    #[test]
    fn envelope_items_become_yes_no_questions() {
        let json = r#"{
            "isSuccess": true,
            "code": 200,
            "message": "ok",
            "result": {
                "questions": [
                    {"id": 7, "questionText": "Q", "source": "s",
                     "subjectiveMemo": "", "criterion": "c"}
                ]
            }
        }"#;
        let questions = parse(json).unwrap();
        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.id, "7");
        assert_eq!(q.kind, QuestionType::YesNo);
        assert_eq!(q.category, "general");
        assert_eq!(q.title, "Q");
        assert_eq!(q.description.as_deref(), Some("c"));
        assert!(q.required);
        assert_eq!(q.order, 1);
    }

    #[test]
    fn rejected_envelope_surfaces_backend_message() {
        let json = r#"{"isSuccess": false, "message": "maintenance window"}"#;
        match parse(json) {
            Err(GatewayError::Backend { message }) => assert_eq!(message, "maintenance window"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unrecognized_body_is_a_shape_error() {
        assert!(matches!(
            parse(r#"{"unexpected": true}"#),
            Err(GatewayError::Shape)
        ));
        assert!(matches!(parse("42"), Err(GatewayError::Shape)));
    }

    fn submit_request(answers: Vec<Answer>) -> SurveySubmitRequest {
        SurveySubmitRequest {
            session_id: "session-1".into(),
            personal_info: PersonalInfo::new("a@b.com", "Kim", "60s", Gender::Female),
            answers,
            completed_at: fixed_now(),
        }
    }

    #[test]
    fn submit_body_keys_answers_by_numeric_id() {
        let body = submit_body(&submit_request(vec![
            Answer::new("7", AnswerValue::Bool(true), fixed_now()),
            Answer::new("8", AnswerValue::Bool(false), fixed_now()),
        ]));

        assert_eq!(body.gender, "FEMALE");
        assert_eq!(body.age_group, "60s");
        assert_eq!(body.survey_answers, BTreeMap::from([(7, true), (8, false)]));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["surveyAnswers"]["7"], true);
        assert_eq!(json["ageGroup"], "60s");
    }

    #[test]
    fn submit_body_drops_inexpressible_answers() {
        let body = submit_body(&submit_request(vec![
            Answer::new("abc", AnswerValue::Bool(true), fixed_now()),
            Answer::new("9", AnswerValue::Integer(4), fixed_now()),
            Answer::new("10", AnswerValue::Bool(true), fixed_now()),
        ]));
        assert_eq!(body.survey_answers, BTreeMap::from([(10, true)]));
    }

    #[test]
    fn submit_envelope_parses_pin() {
        let json = r#"{"isSuccess": true, "result": {"pin": "123456"}}"#;
        let envelope: SubmitEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.is_success);
        assert_eq!(envelope.result.unwrap().pin, "123456");
    }
}
