//! HTTP gateway to the survey backend, with a built-in mock mode.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::sleep;
use tracing::debug;
use uuid::Uuid;

use survey_core::Clock;
use survey_core::model::{Answer, PersonalInfo, Question};

use crate::error::GatewayError;
use crate::{mock, wire};

const CLIENT_VERSION: &str = "1.0.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const MOCK_QUESTIONS_DELAY: Duration = Duration::from_millis(300);
const MOCK_SUBMIT_DELAY: Duration = Duration::from_millis(500);
const MOCK_REGISTER_DELAY: Duration = Duration::from_millis(300);

/// Connection settings for live mode.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub lang: String,
    pub client_version: String,
    pub timeout: Duration,
}

impl GatewayConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            lang: "ko".into(),
            client_version: CLIENT_VERSION.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }
}

/// Optional filters for the question fetch.
#[derive(Debug, Clone, Default)]
pub struct QuestionParams {
    pub category: Option<String>,
    pub lang: Option<String>,
}

/// Everything the backend needs to record one completed survey.
#[derive(Debug, Clone)]
pub struct SurveySubmitRequest {
    pub session_id: String,
    pub personal_info: PersonalInfo,
    pub answers: Vec<Answer>,
    pub completed_at: DateTime<Utc>,
}

/// What a successful submission yields.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub result_id: String,
    pub participant_id: Option<String>,
    pub pin_number: String,
    pub completed_at: DateTime<Utc>,
}

/// Body of the participant registration call. `PinNumber` keeps the
/// backend's historical capitalization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRegistration {
    pub email: String,
    pub name: String,
    pub age_group: String,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survey_result_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_consent: Option<bool>,
    #[serde(rename = "PinNumber", skip_serializing_if = "Option::is_none")]
    pub pin_number: Option<String>,
}

enum Inner {
    Mock { lang: String },
    Live {
        client: reqwest::Client,
        config: GatewayConfig,
    },
}

/// The one door to the backend. Mode is fixed at construction; pages never
/// branch on it.
pub struct SurveyGateway {
    inner: Inner,
    clock: Clock,
}

impl SurveyGateway {
    /// A gateway that serves fixtures and never touches the network.
    #[must_use]
    pub fn mock() -> Self {
        Self::mock_with_lang(mock::DEFAULT_LANG)
    }

    /// Mock gateway with a default locale for fixture selection.
    #[must_use]
    pub fn mock_with_lang(lang: impl Into<String>) -> Self {
        Self {
            inner: Inner::Mock { lang: lang.into() },
            clock: Clock::default_clock(),
        }
    }

    /// A gateway talking to a real backend at `config.base_url`.
    pub fn live(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            inner: Inner::Live { client, config },
            clock: Clock::default_clock(),
        })
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn is_mock(&self) -> bool {
        matches!(self.inner, Inner::Mock { .. })
    }

    /// Fetches the question list, normalized from whichever wire shape the
    /// backend answers with.
    pub async fn get_questions(
        &self,
        params: &QuestionParams,
    ) -> Result<Vec<Question>, GatewayError> {
        match &self.inner {
            Inner::Mock { lang } => {
                sleep(MOCK_QUESTIONS_DELAY).await;
                let lang = params.lang.as_deref().unwrap_or(lang);
                Ok(mock::sample_questions(lang))
            }
            Inner::Live { client, config } => {
                let mut request = self
                    .request(client, config, reqwest::Method::GET, "/survey/questions");
                let mut query: Vec<(&str, &str)> = Vec::new();
                if let Some(category) = params.category.as_deref() {
                    query.push(("category", category));
                }
                let lang = params.lang.as_deref().unwrap_or(&config.lang);
                query.push(("lang", lang));
                request = request.query(&query);

                let response = request.send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(GatewayError::Http { status });
                }
                let body: wire::QuestionsBody =
                    response.json().await.map_err(|_| GatewayError::Shape)?;
                let questions = wire::normalize_questions(body)?;
                debug!(count = questions.len(), "fetched questions");
                Ok(questions)
            }
        }
    }

    /// Submits a completed survey and returns the confirmation PIN.
    pub async fn submit_survey(
        &self,
        request: &SurveySubmitRequest,
    ) -> Result<SubmitOutcome, GatewayError> {
        match &self.inner {
            Inner::Mock { .. } => {
                sleep(MOCK_SUBMIT_DELAY).await;
                Ok(SubmitOutcome {
                    result_id: format!("mock_{}", Uuid::new_v4()),
                    participant_id: Some(format!("participant_{}", Uuid::new_v4())),
                    pin_number: mock::random_pin(),
                    completed_at: self.clock.now(),
                })
            }
            Inner::Live { client, config } => {
                let body = wire::submit_body(request);
                let response = self
                    .request(client, config, reqwest::Method::POST, "/survey/submit")
                    .json(&body)
                    .send()
                    .await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(GatewayError::Http { status });
                }
                let envelope: wire::SubmitEnvelope =
                    response.json().await.map_err(|_| GatewayError::Shape)?;
                if !envelope.is_success {
                    return Err(GatewayError::Backend {
                        message: envelope
                            .message
                            .unwrap_or_else(|| "survey submission rejected".into()),
                    });
                }
                let result = envelope.result.ok_or(GatewayError::Shape)?;
                Ok(SubmitOutcome {
                    result_id: request.session_id.clone(),
                    participant_id: None,
                    pin_number: result.pin,
                    completed_at: self.clock.now(),
                })
            }
        }
    }

    /// Registers the respondent for follow-up. Best-effort from the caller's
    /// point of view; the raw response body is returned as-is.
    pub async fn register_participant(
        &self,
        registration: &ParticipantRegistration,
    ) -> Result<serde_json::Value, GatewayError> {
        match &self.inner {
            Inner::Mock { .. } => {
                sleep(MOCK_REGISTER_DELAY).await;
                Ok(serde_json::json!({
                    "success": true,
                    "data": {
                        "participantId": format!("mock_participant_{}", Uuid::new_v4()),
                        "email": registration.email,
                        "name": registration.name,
                        "registeredAt": self.clock.now().to_rfc3339(),
                        "PinNumber": registration.pin_number,
                    }
                }))
            }
            Inner::Live { client, config } => {
                let response = self
                    .request(
                        client,
                        config,
                        reqwest::Method::POST,
                        "/user/register-participant",
                    )
                    .json(registration)
                    .send()
                    .await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(GatewayError::Http { status });
                }
                response.json().await.map_err(|_| GatewayError::Shape)
            }
        }
    }

    fn request(
        &self,
        client: &reqwest::Client,
        config: &GatewayConfig,
        method: reqwest::Method,
        path: &str,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", config.base_url.trim_end_matches('/'));
        client
            .request(method, url)
            .header("X-Request-ID", Uuid::new_v4().to_string())
            .header("X-Client-Version", &config.client_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::model::{AnswerValue, Gender, QuestionType};
    use survey_core::time::{fixed_clock, fixed_now};

    #[tokio::test]
    async fn mock_serves_locale_fixtures() {
        let gateway = SurveyGateway::mock();
        assert!(gateway.is_mock());

        let en = gateway
            .get_questions(&QuestionParams {
                category: None,
                lang: Some("en".into()),
            })
            .await
            .unwrap();
        assert_eq!(en.len(), 7);
        assert!(en.iter().all(|q| QuestionType::ALL.contains(&q.kind)));

        let fallback = gateway
            .get_questions(&QuestionParams {
                category: None,
                lang: Some("de".into()),
            })
            .await
            .unwrap();
        let ko = gateway.get_questions(&QuestionParams::default()).await.unwrap();
        assert_eq!(fallback, ko);

        let english_default = SurveyGateway::mock_with_lang("en")
            .get_questions(&QuestionParams::default())
            .await
            .unwrap();
        assert_eq!(english_default, en);
    }

    #[tokio::test]
    async fn mock_submit_issues_a_pin() {
        let gateway = SurveyGateway::mock().with_clock(fixed_clock());
        let outcome = gateway
            .submit_survey(&SurveySubmitRequest {
                session_id: "session-1".into(),
                personal_info: PersonalInfo::new("a@b.com", "Kim", "60s", Gender::Male),
                answers: vec![Answer::new("q_005", AnswerValue::Bool(true), fixed_now())],
                completed_at: fixed_now(),
            })
            .await
            .unwrap();

        assert_eq!(outcome.pin_number.len(), 6);
        assert!(outcome.pin_number.chars().all(|c| c.is_ascii_digit()));
        assert!(outcome.result_id.starts_with("mock_"));
        assert_eq!(outcome.completed_at, fixed_now());
    }

    #[tokio::test]
    async fn mock_registration_echoes_the_pin() {
        let gateway = SurveyGateway::mock();
        let body = gateway
            .register_participant(&ParticipantRegistration {
                email: "a@b.com".into(),
                name: "Kim".into(),
                age_group: "60s".into(),
                gender: "MALE".into(),
                survey_result_id: Some("mock_1".into()),
                event_code: None,
                marketing_consent: None,
                pin_number: Some("123456".into()),
            })
            .await
            .unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["PinNumber"], "123456");
    }

    #[test]
    fn registration_serializes_backend_field_names() {
        let registration = ParticipantRegistration {
            email: "a@b.com".into(),
            name: "Kim".into(),
            age_group: "60s".into(),
            gender: "FEMALE".into(),
            survey_result_id: None,
            event_code: None,
            marketing_consent: Some(true),
            pin_number: Some("654321".into()),
        };
        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["ageGroup"], "60s");
        assert_eq!(json["PinNumber"], "654321");
        assert!(json.get("surveyResultId").is_none());
    }

    #[test]
    fn live_construction_succeeds() {
        let gateway =
            SurveyGateway::live(GatewayConfig::new("http://localhost:8080/api/v1")).unwrap();
        assert!(!gateway.is_mock());
    }
}
