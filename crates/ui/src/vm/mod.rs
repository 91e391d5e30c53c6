pub mod forms;
pub mod survey_vm;

pub use forms::{AGE_GROUPS, validate_email, validate_name, validate_phone};
pub use survey_vm::{AUTO_ADVANCE_DELAY_MS, AdvanceToken, SubmitGuard, toggle_selection};
