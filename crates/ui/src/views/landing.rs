use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn LandingView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let store = ctx.store();

    // Offer to resume only while an attempt is actually underway.
    let resume_percent = (store.personal_info().is_some() && store.progress() > 0.0)
        .then(|| format!("{:.0}", store.progress()));

    rsx! {
        div { class: "page landing-page",
            header { class: "view-header",
                h2 { class: "view-title", "Exhibition Health Survey" }
                p { class: "view-subtitle",
                    "A few short questions about health and everyday technology. Your answers are saved on this device as you go."
                }
            }
            div { class: "view-divider" }
            div { class: "landing-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::PersonalInfo {});
                    },
                    "Start Survey"
                }
                if let Some(percent) = resume_percent {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = navigator.push(Route::Survey {});
                        },
                        "Continue ({percent}% complete)"
                    }
                }
            }
            p { class: "view-hint", "Takes about 3 minutes. No account needed." }
        }
    }
}
