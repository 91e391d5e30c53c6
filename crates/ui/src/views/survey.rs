#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tokio::time::sleep;

use services::{ParticipantRegistration, QuestionParams};
use survey_core::model::{AnswerValue, OptionValue, QuestionType};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::state::{ViewError, ViewState, view_state_from_resource};
use crate::vm::survey_vm::{AUTO_ADVANCE_DELAY_MS, AdvanceToken, SubmitGuard, toggle_selection};

#[component]
pub fn SurveyView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let store = ctx.store();
    let gateway = ctx.gateway();
    let clock = ctx.clock();

    let mut index = use_signal({
        let store = store.clone();
        move || store.current_question_index()
    });
    // Bumped after every committed answer so progress and highlights re-read
    // the store.
    let mut revision = use_signal(|| 0_u32);
    let mut submit_error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let mut draft_text = use_signal(String::new);
    let mut draft_multi = use_signal(Vec::<OptionValue>::new);
    let advance_token = use_hook(AdvanceToken::new);
    let submit_guard = use_hook(SubmitGuard::new);

    // The form page collects details first; bounce back if it was skipped.
    let missing_info = store.personal_info().is_none();
    use_effect(move || {
        if missing_info {
            let _ = navigator.replace(Route::PersonalInfo {});
        }
    });

    let store_for_resource = store.clone();
    let gateway_for_resource = gateway.clone();
    let resource = use_resource(move || {
        let store = store_for_resource.clone();
        let gateway = gateway_for_resource.clone();
        let mut revision = revision;
        async move {
            store.mark_started().await.map_err(|_| ViewError::Load)?;
            // Only an empty list needs the network. Fetching over a loaded
            // list could rotate the question ids and prune the committed
            // answers with them.
            let loaded = store.questions();
            if !loaded.is_empty() {
                return Ok(loaded);
            }
            let questions = gateway
                .get_questions(&QuestionParams::default())
                .await
                .map_err(|_| ViewError::Load)?;
            store.set_questions(questions.clone());
            revision += 1;
            Ok::<_, ViewError>(questions)
        }
    });

    let store_for_submit = store.clone();
    let gateway_for_submit = gateway.clone();
    let guard_for_submit = submit_guard.clone();
    let perform_submit = use_callback(move |(): ()| {
        // Claimed before any await so a double tap cannot start twice.
        if !guard_for_submit.try_begin() {
            return;
        }
        let store = store_for_submit.clone();
        let gateway = gateway_for_submit.clone();
        let guard = guard_for_submit.clone();
        let mut submit_error = submit_error;
        let mut submitting = submitting;
        spawn(async move {
            submitting.set(true);
            submit_error.set(None);
            let Some(request) = store.build_submit_request(clock.now()) else {
                guard.finish();
                submitting.set(false);
                submit_error.set(Some("Missing participant details.".into()));
                return;
            };
            match gateway.submit_survey(&request).await {
                Ok(outcome) => {
                    let _ = store.set_pin_number(outcome.pin_number.clone()).await;
                    // Best-effort: registration failure must not block the
                    // PIN screen.
                    let info = request.personal_info;
                    let registration = ParticipantRegistration {
                        email: info.email,
                        name: info.name,
                        age_group: info.age_group,
                        gender: info.gender.as_upper().to_string(),
                        survey_result_id: Some(outcome.result_id.clone()),
                        event_code: info.event_code,
                        marketing_consent: info.marketing_consent,
                        pin_number: Some(outcome.pin_number.clone()),
                    };
                    let _ = gateway.register_participant(&registration).await;
                    let _ = navigator.push(Route::SurveyResult {});
                }
                Err(err) => {
                    submitting.set(false);
                    guard.finish();
                    submit_error.set(Some(match err.backend_message() {
                        Some(message) => message.to_string(),
                        None => ViewError::Submit(None).message(),
                    }));
                }
            }
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<SurveyTestHandles>() {
                handles.register(perform_submit);
            }
        }
    }

    // Seed the working drafts from the committed answer whenever the cursor
    // moves (or the questions finish loading).
    let store_for_drafts = store.clone();
    use_effect(move || {
        let idx = index();
        let _ = revision();
        let existing = store_for_drafts
            .question_at(idx)
            .and_then(|question| store_for_drafts.answer_for(&question.id))
            .map(|answer| answer.value);
        match existing {
            Some(AnswerValue::Text(text)) => {
                draft_text.set(text);
                draft_multi.set(Vec::new());
            }
            Some(AnswerValue::Many(values)) => {
                draft_multi.set(values);
                draft_text.set(String::new());
            }
            _ => {
                draft_text.set(String::new());
                draft_multi.set(Vec::new());
            }
        }
    });

    let state = view_state_from_resource(&resource);
    let _ = revision();

    rsx! {
        div { class: "page survey-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    div { class: "survey-loading",
                        p { "Loading questions..." }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "form-error", "{err.message()}" }
                    div { class: "survey-actions",
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Landing {});
                            },
                            "Back to start"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(questions) => {
                    if questions.is_empty() {
                        rsx! {
                            p { "No questions are available right now." }
                        }
                    } else {
                        let total = questions.len();
                        let idx = index().min(total - 1);
                        let question = questions[idx].clone();
                        let is_last = idx + 1 == total;
                        let question_number = idx + 1;
                        let progress = store.progress();
                        let answered = store.answer_for(&question.id).map(|answer| answer.value);
                        #[allow(clippy::cast_precision_loss)]
                        let bar_width = format!("width: {:.0}%", idx as f64 / total as f64 * 100.0);

                        // Commit, then advance after the highlight delay; the
                        // last question submits at once. A newer selection
                        // invalidates the pending advance.
                        let on_select = {
                            let store = store.clone();
                            let token = advance_token.clone();
                            let question_id = question.id.clone();
                            move |value: AnswerValue| {
                                let store = store.clone();
                                let token = token.clone();
                                let generation = token.arm();
                                let question_id = question_id.clone();
                                let mut revision = revision;
                                let mut index = index;
                                spawn(async move {
                                    let _ = store.set_answer(question_id, value).await;
                                    revision += 1;
                                    if is_last {
                                        if token.is_current(generation) {
                                            perform_submit.call(());
                                        }
                                        return;
                                    }
                                    sleep(Duration::from_millis(AUTO_ADVANCE_DELAY_MS)).await;
                                    if !token.is_current(generation) {
                                        return;
                                    }
                                    let next = idx + 1;
                                    index.set(next);
                                    let _ = store.set_current_question_index(next).await;
                                });
                            }
                        };

                        let manual = matches!(
                            question.kind,
                            QuestionType::MultipleChoice | QuestionType::Text
                        );
                        let can_proceed = match question.kind {
                            QuestionType::Text => !draft_text().trim().is_empty(),
                            QuestionType::MultipleChoice => !draft_multi().is_empty(),
                            _ => false,
                        };

                        let on_next = {
                            let store = store.clone();
                            let question = question.clone();
                            move |_| {
                                let value = match question.kind {
                                    QuestionType::Text => {
                                        let text = draft_text().trim().to_string();
                                        if text.is_empty() {
                                            return;
                                        }
                                        AnswerValue::Text(text)
                                    }
                                    QuestionType::MultipleChoice => {
                                        let values = draft_multi();
                                        if values.is_empty() {
                                            return;
                                        }
                                        AnswerValue::Many(values)
                                    }
                                    _ => return,
                                };
                                let store = store.clone();
                                let question_id = question.id.clone();
                                let mut revision = revision;
                                let mut index = index;
                                spawn(async move {
                                    let _ = store.set_answer(question_id, value).await;
                                    revision += 1;
                                    if is_last {
                                        perform_submit.call(());
                                    } else {
                                        let next = idx + 1;
                                        index.set(next);
                                        let _ = store.set_current_question_index(next).await;
                                    }
                                });
                            }
                        };

                        let on_previous = {
                            let store = store.clone();
                            let token = advance_token.clone();
                            move |_| {
                                token.cancel();
                                if idx == 0 {
                                    return;
                                }
                                let previous = idx - 1;
                                let mut index = index;
                                index.set(previous);
                                let store = store.clone();
                                spawn(async move {
                                    let _ = store.set_current_question_index(previous).await;
                                });
                            }
                        };

                        let body = match question.kind {
                            QuestionType::SingleChoice => {
                                let buttons = question.options.iter().map(|option| {
                                    let value = AnswerValue::from(option.value.clone());
                                    let selected = answered.as_ref() == Some(&value);
                                    let text = option.text.clone();
                                    let on_select = on_select.clone();
                                    rsx! {
                                        button {
                                            class: if selected { "choice-option choice-option--selected" } else { "choice-option" },
                                            r#type: "button",
                                            onclick: move |_| on_select(value.clone()),
                                            "{text}"
                                        }
                                    }
                                });
                                rsx! {
                                    div { class: "choice-list", {buttons} }
                                }
                            }
                            QuestionType::MultipleChoice => {
                                let buttons = question.options.iter().map(|option| {
                                    let value = option.value.clone();
                                    let checked = draft_multi().contains(&value);
                                    let text = option.text.clone();
                                    let mut draft_multi = draft_multi;
                                    rsx! {
                                        button {
                                            class: if checked { "choice-option choice-option--selected" } else { "choice-option" },
                                            r#type: "button",
                                            onclick: move |_| {
                                                draft_multi.set(toggle_selection(draft_multi(), &value));
                                            },
                                            "{text}"
                                        }
                                    }
                                });
                                rsx! {
                                    div { class: "choice-list", {buttons} }
                                }
                            }
                            QuestionType::Text => rsx! {
                                textarea {
                                    class: "field-input survey-textarea",
                                    rows: 5,
                                    placeholder: "Type your answer...",
                                    value: "{draft_text()}",
                                    oninput: move |evt| draft_text.set(evt.value()),
                                }
                            },
                            QuestionType::Scale | QuestionType::Rating => {
                                let (min, max) = question.scale_bounds();
                                let buttons = (min..=max).map(|value| {
                                    let selected =
                                        answered.as_ref() == Some(&AnswerValue::Integer(value));
                                    let on_select = on_select.clone();
                                    rsx! {
                                        button {
                                            class: if selected { "scale-button scale-button--selected" } else { "scale-button" },
                                            r#type: "button",
                                            onclick: move |_| on_select(AnswerValue::Integer(value)),
                                            "{value}"
                                        }
                                    }
                                });
                                rsx! {
                                    div { class: "scale-row", {buttons} }
                                    div { class: "scale-legend",
                                        span { "Low" }
                                        span { "High" }
                                    }
                                }
                            }
                            QuestionType::YesNo => {
                                let yes_selected =
                                    answered.as_ref() == Some(&AnswerValue::Bool(true));
                                let no_selected =
                                    answered.as_ref() == Some(&AnswerValue::Bool(false));
                                let on_select_yes = on_select.clone();
                                let on_select_no = on_select.clone();
                                rsx! {
                                    div { class: "yesno-row",
                                        button {
                                            class: if yes_selected { "yesno-button yesno-button--selected" } else { "yesno-button" },
                                            r#type: "button",
                                            onclick: move |_| on_select_yes(AnswerValue::Bool(true)),
                                            span { class: "yesno-glyph", "O" }
                                            span { "Yes" }
                                        }
                                        button {
                                            class: if no_selected { "yesno-button yesno-button--selected" } else { "yesno-button" },
                                            r#type: "button",
                                            onclick: move |_| on_select_no(AnswerValue::Bool(false)),
                                            span { class: "yesno-glyph", "X" }
                                            span { "No" }
                                        }
                                    }
                                }
                            }
                        };

                        rsx! {
                            div { class: "survey-progress",
                                div { class: "survey-progress-labels",
                                    span { "Question {question_number} / {total}" }
                                    span { "{progress:.0}% complete" }
                                }
                                div { class: "progress-track",
                                    div { class: "progress-fill", style: "{bar_width}" }
                                }
                            }
                            div { class: "question-card",
                                span { class: "category-chip", "{question.category}" }
                                h2 { class: "question-title", "{question.title}" }
                                if let Some(description) = question.description.as_ref() {
                                    p { class: "question-description", "{description}" }
                                }
                                if question.required {
                                    p { class: "question-required", "* Required" }
                                }
                                div { class: "question-body", {body} }
                                if let Some(message) = submit_error() {
                                    p { class: "form-error", "{message}" }
                                }
                                div { class: "survey-actions",
                                    button {
                                        class: "btn btn-secondary",
                                        r#type: "button",
                                        disabled: idx == 0,
                                        onclick: on_previous,
                                        "Previous"
                                    }
                                    if manual {
                                        button {
                                            class: "btn btn-primary",
                                            r#type: "button",
                                            disabled: !can_proceed || submitting(),
                                            onclick: on_next,
                                            if submitting() {
                                                "Submitting..."
                                            } else if is_last {
                                                "Submit"
                                            } else {
                                                "Next"
                                            }
                                        }
                                    } else if submitting() {
                                        p { class: "view-hint", "Submitting..." }
                                    } else {
                                        p { class: "view-hint", "Select an answer to continue" }
                                    }
                                }
                            }
                            p { class: "survey-autosave", "Answers are saved automatically" }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SurveyTestHandles {
    submit: Rc<RefCell<Option<Callback<()>>>>,
}

#[cfg(test)]
impl SurveyTestHandles {
    pub(crate) fn register(&self, submit: Callback<()>) {
        *self.submit.borrow_mut() = Some(submit);
    }

    pub(crate) fn submit(&self) -> Callback<()> {
        (*self.submit.borrow()).expect("submit callback registered")
    }
}
