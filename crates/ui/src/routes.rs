use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{LandingView, PersonalInfoView, ResultView, SurveyView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LandingView)] Landing {},
        #[route("/personal-info", PersonalInfoView)] PersonalInfo {},
        #[route("/survey", SurveyView)] Survey {},
        #[route("/result", ResultView)] SurveyResult {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
