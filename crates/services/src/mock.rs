//! Built-in fixtures for mock mode.
//!
//! Mock mode serves a fixed seven-question set per locale and fabricates
//! submit/registration responses, so the full flow works with no backend.

use rand::Rng;
use survey_core::model::{OptionValue, Question, QuestionOption, QuestionType};

pub(crate) const DEFAULT_LANG: &str = "ko";

fn option(id: &str, text: &str, value: OptionValue) -> QuestionOption {
    QuestionOption {
        id: id.into(),
        text: text.into(),
        value,
    }
}

#[allow(clippy::too_many_arguments)]
fn question(
    id: &str,
    kind: QuestionType,
    category: &str,
    title: &str,
    description: Option<&str>,
    options: Vec<QuestionOption>,
    required: bool,
    order: u32,
) -> Question {
    let bounded = matches!(kind, QuestionType::Scale | QuestionType::Rating);
    Question {
        id: id.into(),
        kind,
        category: category.into(),
        title: title.into(),
        description: description.map(Into::into),
        options,
        required,
        order,
        min_value: bounded.then_some(1),
        max_value: bounded.then_some(5),
    }
}

/// The fixture set for `lang`, falling back to Korean for unknown locales.
pub(crate) fn sample_questions(lang: &str) -> Vec<Question> {
    match lang {
        "en" => english_questions(),
        "ja" => japanese_questions(),
        _ => korean_questions(),
    }
}

fn korean_questions() -> Vec<Question> {
    vec![
        question(
            "q_001",
            QuestionType::SingleChoice,
            "health",
            "현재 귀하의 건강 상태는 어떻습니까?",
            None,
            vec![
                option("opt_001_1", "매우 건강함", OptionValue::Number(5)),
                option("opt_001_2", "건강함", OptionValue::Number(4)),
                option("opt_001_3", "보통", OptionValue::Number(3)),
                option("opt_001_4", "건강하지 않음", OptionValue::Number(2)),
                option("opt_001_5", "매우 건강하지 않음", OptionValue::Number(1)),
            ],
            true,
            1,
        ),
        question(
            "q_002",
            QuestionType::Scale,
            "technology",
            "스마트폰 사용에 얼마나 익숙하십니까?",
            Some("1점(전혀 익숙하지 않음)부터 5점(매우 익숙함)까지 선택해주세요"),
            Vec::new(),
            true,
            2,
        ),
        question(
            "q_003",
            QuestionType::MultipleChoice,
            "lifestyle",
            "평소 관심 있는 활동을 모두 선택해주세요",
            None,
            vec![
                option("opt_003_1", "운동/체육", OptionValue::Text("exercise".into())),
                option("opt_003_2", "독서", OptionValue::Text("reading".into())),
                option("opt_003_3", "여행", OptionValue::Text("travel".into())),
                option("opt_003_4", "음악/공연", OptionValue::Text("music".into())),
                option("opt_003_5", "요리", OptionValue::Text("cooking".into())),
            ],
            true,
            3,
        ),
        question(
            "q_004",
            QuestionType::Text,
            "general",
            "박람회에서 가장 기대하시는 것은 무엇인가요?",
            None,
            Vec::new(),
            false,
            4,
        ),
        question(
            "q_005",
            QuestionType::YesNo,
            "technology",
            "스마트 기기를 사용하여 건강 관리를 하고 계신가요?",
            Some("O 또는 X를 선택해주세요"),
            Vec::new(),
            true,
            5,
        ),
        question(
            "q_006",
            QuestionType::YesNo,
            "general",
            "박람회 정보를 정기적으로 받아보시겠습니까?",
            None,
            Vec::new(),
            true,
            6,
        ),
        question(
            "q_007",
            QuestionType::Rating,
            "general",
            "이 설문조사의 편의성을 평가해주세요",
            Some("1점(매우 불편함)부터 5점(매우 편리함)까지 평가해주세요"),
            Vec::new(),
            true,
            7,
        ),
    ]
}

fn english_questions() -> Vec<Question> {
    vec![
        question(
            "q_001",
            QuestionType::SingleChoice,
            "health",
            "How would you rate your current health condition?",
            None,
            vec![
                option("opt_001_1", "Very Healthy", OptionValue::Number(5)),
                option("opt_001_2", "Healthy", OptionValue::Number(4)),
                option("opt_001_3", "Average", OptionValue::Number(3)),
                option("opt_001_4", "Unhealthy", OptionValue::Number(2)),
                option("opt_001_5", "Very Unhealthy", OptionValue::Number(1)),
            ],
            true,
            1,
        ),
        question(
            "q_002",
            QuestionType::Scale,
            "technology",
            "How familiar are you with using smartphones?",
            Some("Please select from 1 (Not familiar at all) to 5 (Very familiar)"),
            Vec::new(),
            true,
            2,
        ),
        question(
            "q_003",
            QuestionType::MultipleChoice,
            "lifestyle",
            "Please select all activities you are interested in",
            None,
            vec![
                option("opt_003_1", "Exercise/Sports", OptionValue::Text("exercise".into())),
                option("opt_003_2", "Reading", OptionValue::Text("reading".into())),
                option("opt_003_3", "Travel", OptionValue::Text("travel".into())),
                option("opt_003_4", "Music/Concerts", OptionValue::Text("music".into())),
                option("opt_003_5", "Cooking", OptionValue::Text("cooking".into())),
            ],
            true,
            3,
        ),
        question(
            "q_004",
            QuestionType::Text,
            "general",
            "What are you most looking forward to at the exhibition?",
            None,
            Vec::new(),
            false,
            4,
        ),
        question(
            "q_005",
            QuestionType::YesNo,
            "technology",
            "Do you use smart devices for health management?",
            Some("Please select Yes or No"),
            Vec::new(),
            true,
            5,
        ),
        question(
            "q_006",
            QuestionType::YesNo,
            "general",
            "Would you like to receive regular exhibition updates?",
            None,
            Vec::new(),
            true,
            6,
        ),
        question(
            "q_007",
            QuestionType::Rating,
            "general",
            "Please rate the convenience of this survey",
            Some("Please rate from 1 (Very inconvenient) to 5 (Very convenient)"),
            Vec::new(),
            true,
            7,
        ),
    ]
}

fn japanese_questions() -> Vec<Question> {
    vec![
        question(
            "q_001",
            QuestionType::SingleChoice,
            "health",
            "現在のあなたの健康状態はいかがですか？",
            None,
            vec![
                option("opt_001_1", "非常に健康", OptionValue::Number(5)),
                option("opt_001_2", "健康", OptionValue::Number(4)),
                option("opt_001_3", "普通", OptionValue::Number(3)),
                option("opt_001_4", "健康でない", OptionValue::Number(2)),
                option("opt_001_5", "非常に健康でない", OptionValue::Number(1)),
            ],
            true,
            1,
        ),
        question(
            "q_002",
            QuestionType::Scale,
            "technology",
            "スマートフォンの使用にどのくらい慣れていますか？",
            Some("1点（全く慣れていない）から5点（非常に慣れている）まで選択してください"),
            Vec::new(),
            true,
            2,
        ),
        question(
            "q_003",
            QuestionType::MultipleChoice,
            "lifestyle",
            "普段興味のある活動をすべて選択してください",
            None,
            vec![
                option("opt_003_1", "運動/スポーツ", OptionValue::Text("exercise".into())),
                option("opt_003_2", "読書", OptionValue::Text("reading".into())),
                option("opt_003_3", "旅行", OptionValue::Text("travel".into())),
                option("opt_003_4", "音楽/コンサート", OptionValue::Text("music".into())),
                option("opt_003_5", "料理", OptionValue::Text("cooking".into())),
            ],
            true,
            3,
        ),
        question(
            "q_004",
            QuestionType::Text,
            "general",
            "展示会で最も期待していることは何ですか？",
            None,
            Vec::new(),
            false,
            4,
        ),
        question(
            "q_005",
            QuestionType::YesNo,
            "technology",
            "スマートデバイスを使用して健康管理をしていますか？",
            Some("OまたはXを選択してください"),
            Vec::new(),
            true,
            5,
        ),
        question(
            "q_006",
            QuestionType::YesNo,
            "general",
            "展示会情報を定期的に受け取りますか？",
            None,
            Vec::new(),
            true,
            6,
        ),
        question(
            "q_007",
            QuestionType::Rating,
            "general",
            "このアンケートの便利さを評価してください",
            Some("1点（非常に不便）から5点（非常に便利）まで評価してください"),
            Vec::new(),
            true,
            7,
        ),
    ]
}

/// A random six-digit confirmation PIN.
pub(crate) fn random_pin() -> String {
    rand::rng().random_range(100_000..1_000_000_u32).to_string()
}
