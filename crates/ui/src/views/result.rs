use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn ResultView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let store = ctx.store();

    let info = store.personal_info();
    let name = info.as_ref().map(|info| info.name.clone());
    let pin = store.pin_number();
    let mut resetting = use_signal(|| false);

    let store_for_reset = store.clone();
    rsx! {
        div { class: "page result-page",
            header { class: "view-header",
                h2 { class: "view-title", "Thank you!" }
                if let Some(name) = name {
                    p { class: "view-subtitle", "Your survey was submitted, {name}." }
                } else {
                    p { class: "view-subtitle", "Your survey was submitted." }
                }
            }
            div { class: "view-divider" }
            if let Some(info) = info {
                div { class: "participant-card",
                    h3 { class: "participant-title", "Participant" }
                    div { class: "participant-row",
                        span { "Name" }
                        span { "{info.name}" }
                    }
                    div { class: "participant-row",
                        span { "Email" }
                        span { "{info.email}" }
                    }
                    div { class: "participant-row",
                        span { "Age group" }
                        span { "{info.age_group}" }
                    }
                    div { class: "participant-row",
                        span { "Gender" }
                        span { "{info.gender.as_str()}" }
                    }
                }
            }
            if let Some(pin) = pin {
                div { class: "pin-card",
                    p { class: "pin-label", "Your confirmation PIN" }
                    p { class: "pin-digits", "{pin}" }
                    p { class: "pin-hint",
                        "Show this PIN at the information desk to receive your results."
                    }
                }
            } else {
                p { "Your submission was received." }
            }
            div { class: "result-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: resetting(),
                    onclick: move |_| {
                        let store = store_for_reset.clone();
                        spawn(async move {
                            resetting.set(true);
                            let _ = store.reset_survey().await;
                            let _ = navigator.push(Route::Landing {});
                        });
                    },
                    "Start a new survey"
                }
            }
        }
    }
}
