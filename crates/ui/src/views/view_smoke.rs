use std::sync::Arc;

use services::{GatewayConfig, SurveyGateway};
use storage::repository::Storage;
use survey_core::model::{AnswerValue, Gender, PersonalInfo, Question, QuestionType};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with};

fn yes_no_question(id: &str) -> Question {
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

fn participant() -> PersonalInfo {
    PersonalInfo::new("kim@example.com", "Kim", "60s", Gender::Female)
}

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_offers_resume_mid_attempt() {
    let mut harness = setup_view_harness(ViewKind::Landing).await;
    harness
        .store
        .set_personal_info(participant())
        .await
        .expect("save personal info");
    harness
        .store
        .set_questions(vec![yes_no_question("q_a"), yes_no_question("q_b")]);
    harness
        .store
        .set_answer("q_a", AnswerValue::Bool(true))
        .await
        .expect("save answer");

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Start Survey"), "missing start button in {html}");
    assert!(
        html.contains("Continue (50% complete)"),
        "missing resume button in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_hides_resume_without_progress() {
    let mut harness = setup_view_harness(ViewKind::Landing).await;
    harness.rebuild();
    let html = harness.render();
    assert!(!html.contains("Continue ("), "unexpected resume button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn personal_info_view_smoke_prefills_saved_details() {
    let mut harness = setup_view_harness(ViewKind::PersonalInfo).await;
    harness
        .store
        .set_personal_info(participant())
        .await
        .expect("save personal info");

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("kim@example.com"), "missing email in {html}");
    assert!(html.contains("Kim"), "missing name in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_redirects_without_personal_info() {
    let mut harness = setup_view_harness(ViewKind::Survey).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("/personal-info"),
        "missing redirect target in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_resumes_without_refetching_questions() {
    let mut harness = setup_view_harness(ViewKind::Survey).await;
    harness
        .store
        .set_personal_info(participant())
        .await
        .expect("save personal info");
    harness
        .store
        .set_questions(vec![yes_no_question("legacy_1"), yes_no_question("legacy_2")]);
    harness
        .store
        .set_answer("legacy_1", AnswerValue::Bool(true))
        .await
        .expect("save answer");

    harness.rebuild();
    // Long enough for a (wrongly issued) mock fetch to have landed.
    for _ in 0..10 {
        harness.drive_async().await;
    }

    let ids: Vec<String> = harness
        .store
        .questions()
        .into_iter()
        .map(|question| question.id)
        .collect();
    assert_eq!(ids, vec!["legacy_1", "legacy_2"]);
    assert!(harness.store.answer_for("legacy_1").is_some());
    let html = harness.render();
    assert!(
        html.contains("Question legacy_1"),
        "missing resumed question in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_surfaces_submit_failure() {
    // Nothing listens on this port; the submit fails at the transport.
    let gateway = Arc::new(
        SurveyGateway::live(GatewayConfig::new("http://127.0.0.1:9/api/v1"))
            .expect("build live gateway"),
    );
    let mut harness =
        setup_view_harness_with(ViewKind::Survey, Storage::in_memory(), gateway).await;
    harness
        .store
        .set_personal_info(participant())
        .await
        .expect("save personal info");
    harness.store.set_questions(vec![yes_no_question("7")]);
    harness
        .store
        .set_answer("7", AnswerValue::Bool(true))
        .await
        .expect("save answer");

    harness.rebuild();
    harness.drive_async().await;

    let handles = harness.survey_handles.clone().expect("survey handles");
    handles.submit().call(());
    for _ in 0..10 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(
        html.contains("Submission failed. Please try again."),
        "missing submit error in {html}"
    );
    assert!(harness.store.pin_number().is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_pin_and_participant_info() {
    let mut harness = setup_view_harness(ViewKind::Result).await;
    harness
        .store
        .set_personal_info(participant())
        .await
        .expect("save personal info");
    harness
        .store
        .set_pin_number("123456")
        .await
        .expect("save pin");

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("123456"), "missing pin in {html}");
    assert!(html.contains("Participant"), "missing participant block in {html}");
    assert!(html.contains("kim@example.com"), "missing email in {html}");
    assert!(html.contains("60s"), "missing age group in {html}");
}
