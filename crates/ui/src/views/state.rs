use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Load,
    Submit(Option<String>),
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Load => "Could not load the questions. Please try again.".into(),
            Self::Submit(Some(message)) => message.clone(),
            Self::Submit(None) => "Submission failed. Please try again.".into(),
            Self::Unknown => "Something went wrong. Please try again.".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
