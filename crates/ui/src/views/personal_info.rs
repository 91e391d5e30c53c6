use dioxus::prelude::*;
use dioxus_router::use_navigator;

use survey_core::model::{Gender, PersonalInfo};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::forms::{AGE_GROUPS, validate_email, validate_name, validate_phone};

const GENDERS: [(Gender, &str); 3] = [
    (Gender::Male, "Male"),
    (Gender::Female, "Female"),
    (Gender::Other, "Other"),
];

#[component]
pub fn PersonalInfoView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let store = ctx.store();

    // Prefill from a previous attempt so resuming does not retype anything.
    let existing = store.personal_info();
    let mut name = use_signal({
        let existing = existing.clone();
        move || existing.map(|info| info.name).unwrap_or_default()
    });
    let mut email = use_signal({
        let existing = existing.clone();
        move || existing.map(|info| info.email).unwrap_or_default()
    });
    let mut age_group = use_signal({
        let existing = existing.clone();
        move || existing.map(|info| info.age_group).unwrap_or_default()
    });
    let mut gender = use_signal({
        let existing = existing.clone();
        move || existing.map(|info| info.gender)
    });
    let mut phone = use_signal(move || existing.and_then(|info| info.phone).unwrap_or_default());
    let mut form_error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let store_for_submit = store.clone();
    let on_submit = move |_| {
        let name_value = name().trim().to_string();
        let email_value = email().trim().to_string();
        let age_group_value = age_group();
        let phone_value = phone().trim().to_string();

        if let Err(message) = validate_name(&name_value) {
            form_error.set(Some(message.into()));
            return;
        }
        if let Err(message) = validate_email(&email_value) {
            form_error.set(Some(message.into()));
            return;
        }
        if age_group_value.is_empty() {
            form_error.set(Some("Please select your age group".into()));
            return;
        }
        let Some(gender_value) = gender() else {
            form_error.set(Some("Please select your gender".into()));
            return;
        };
        if let Err(message) = validate_phone(&phone_value) {
            form_error.set(Some(message.into()));
            return;
        }

        let mut info = PersonalInfo::new(email_value, name_value, age_group_value, gender_value);
        if !phone_value.is_empty() {
            info.phone = Some(phone_value);
        }

        form_error.set(None);
        let store = store_for_submit.clone();
        spawn(async move {
            saving.set(true);
            if store.set_personal_info(info).await.is_ok() {
                let _ = navigator.push(Route::Survey {});
            } else {
                saving.set(false);
                form_error.set(Some("Could not save your details. Please try again.".into()));
            }
        });
    };

    let gender_buttons = GENDERS.map(|(value, label)| {
        let selected = gender() == Some(value);
        rsx! {
            button {
                class: if selected { "choice-pill choice-pill--selected" } else { "choice-pill" },
                r#type: "button",
                onclick: move |_| gender.set(Some(value)),
                "{label}"
            }
        }
    });

    rsx! {
        div { class: "page personal-info-page",
            header { class: "view-header",
                h2 { class: "view-title", "About you" }
                p { class: "view-subtitle", "We need a few details before the questions start." }
            }
            div { class: "view-divider" }

            div { class: "form",
                div { class: "field",
                    label { class: "field-label", "Name *" }
                    input {
                        class: "field-input",
                        r#type: "text",
                        placeholder: "Your name",
                        value: "{name()}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
                div { class: "field",
                    label { class: "field-label", "Email *" }
                    input {
                        class: "field-input",
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: "{email()}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                div { class: "field",
                    label { class: "field-label", "Age group *" }
                    select {
                        class: "field-input",
                        value: "{age_group()}",
                        onchange: move |evt| age_group.set(evt.value()),
                        option { value: "", "Select your age group" }
                        for bracket in AGE_GROUPS {
                            option { value: bracket, selected: age_group() == bracket, "{bracket}" }
                        }
                    }
                }
                div { class: "field",
                    label { class: "field-label", "Gender *" }
                    div { class: "choice-row",
                        {gender_buttons.into_iter()}
                    }
                }
                div { class: "field",
                    label { class: "field-label", "Phone (optional)" }
                    input {
                        class: "field-input",
                        r#type: "tel",
                        placeholder: "010-1234-5678",
                        value: "{phone()}",
                        oninput: move |evt| phone.set(evt.value()),
                    }
                }

                if let Some(message) = form_error() {
                    p { class: "form-error", "{message}" }
                }

                div { class: "form-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = navigator.push(Route::Landing {});
                        },
                        "Back"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: saving(),
                        onclick: on_submit,
                        "Next"
                    }
                }
            }
            p { class: "view-hint", "Your details are stored only on this device." }
        }
    }
}
