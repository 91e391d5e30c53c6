#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod gateway;
mod mock;
pub mod session_store_service;
mod wire;

pub use survey_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, GatewayError, SessionStoreError};
pub use gateway::{
    GatewayConfig, ParticipantRegistration, QuestionParams, SubmitOutcome, SurveyGateway,
    SurveySubmitRequest,
};
pub use session_store_service::SessionStoreService;
