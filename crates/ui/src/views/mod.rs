mod landing;
mod personal_info;
mod result;
mod state;
mod survey;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use landing::LandingView;
pub use personal_info::PersonalInfoView;
pub use result::ResultView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use survey::SurveyView;
