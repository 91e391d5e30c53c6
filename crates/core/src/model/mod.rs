mod answer;
mod personal_info;
mod question;
mod session;

pub use answer::{Answer, AnswerValue};
pub use personal_info::{Gender, PersonalInfo};
pub use question::{OptionValue, Question, QuestionOption, QuestionType};
pub use session::SurveySession;
