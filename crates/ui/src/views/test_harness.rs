use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{Clock, SessionStoreService, SurveyGateway};
use storage::repository::Storage;
use survey_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::views::survey::SurveyTestHandles;
use crate::views::{LandingView, PersonalInfoView, ResultView, SurveyView};

#[derive(Clone)]
struct TestApp {
    store: Arc<SessionStoreService>,
    gateway: Arc<SurveyGateway>,
}

impl UiApp for TestApp {
    fn store(&self) -> Arc<SessionStoreService> {
        Arc::clone(&self.store)
    }

    fn gateway(&self) -> Arc<SurveyGateway> {
        Arc::clone(&self.gateway)
    }

    fn clock(&self) -> Clock {
        fixed_clock()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Landing,
    PersonalInfo,
    Survey,
    Result,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    survey_handles: Option<SurveyTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.survey_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    // Views navigate with real app paths; catching them here makes the
    // target observable in rendered output.
    #[route("/:..segments")]
    Redirected { segments: Vec<String> },
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Landing => rsx! { LandingView {} },
        ViewKind::PersonalInfo => rsx! { PersonalInfoView {} },
        ViewKind::Survey => rsx! { SurveyView {} },
        ViewKind::Result => rsx! { ResultView {} },
    }
}

#[component]
fn Redirected(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        p { class: "redirect-target", "/{path}" }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub store: Arc<SessionStoreService>,
    pub survey_handles: Option<SurveyTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with(view, Storage::in_memory(), Arc::new(SurveyGateway::mock())).await
}

pub async fn setup_view_harness_with(
    view: ViewKind,
    storage: Storage,
    gateway: Arc<SurveyGateway>,
) -> ViewHarness {
    let store = Arc::new(
        SessionStoreService::load_or_create(Arc::clone(&storage.sessions), fixed_clock())
            .await
            .expect("load session store"),
    );
    let survey_handles = match view {
        ViewKind::Survey => Some(SurveyTestHandles::default()),
        _ => None,
    };

    let app = Arc::new(TestApp {
        store: Arc::clone(&store),
        gateway,
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            survey_handles: survey_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        store,
        survey_handles,
    }
}
