use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// The uppercase label the submit backend expects.
    #[must_use]
    pub fn as_upper(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Other => "OTHER",
        }
    }
}

/// Respondent details captured by the personal-info form.
///
/// Written once per attempt and only ever replaced wholesale; `saved_at` is
/// stamped by the session store at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub email: String,
    pub name: String,
    pub age_group: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_consent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl PersonalInfo {
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        age_group: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            age_group: age_group.into(),
            gender,
            phone: None,
            event_code: None,
            marketing_consent: None,
            saved_at: None,
        }
    }
}
