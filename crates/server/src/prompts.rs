//! Prompt templates.

use gonghun_core::Error;
use rmcp::model::{GetPromptResult, JsonObject, Prompt, PromptArgument, PromptMessage, PromptMessageRole};

pub const SEARCH_ACTIVIST: &str = "search-independence-activist";

const SEARCH_INSTRUCTIONS: &str = "위 정보를 바탕으로 독립유공자를 검색하고, 해당 독립유공자의 생애, 주요 독립운동 활동, \
                                   공적과 역사적 의의를 상세히 설명해주세요. 가능하면 관련된 다른 독립운동가나 \
                                   역사적 사건도 함께 언급해주세요.";

fn argument(name: &str, description: &str) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(false),
    }
}

pub fn list() -> Vec<Prompt> {
    vec![Prompt::new(
        SEARCH_ACTIVIST,
        Some("이름, 운동계열, 지역 등의 조건으로 독립유공자 정보를 검색합니다"),
        Some(vec![
            argument("name", "독립유공자 이름 (예: 유관순, 안중근 등)"),
            argument("workout", "운동계열 (예: 3.1운동, 광복군, 의병, 임시정부 등)"),
            argument("region", "본적 지역 (예: 서울, 평안남도, 경기도 등)"),
        ]),
    )]
}

/// Render `name` with its arguments. Blank arguments are left out.
pub fn render(name: &str, arguments: Option<&JsonObject>) -> Result<GetPromptResult, Error> {
    if name != SEARCH_ACTIVIST {
        return Err(Error::ResourceNotFound(format!("unknown prompt: {name}")));
    }

    let arg = |key: &str| {
        arguments
            .and_then(|args| args.get(key))
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let mut text = String::from("독립유공자 정보를 조회합니다.\n\n");
    for (key, label) in [("name", "이름"), ("workout", "운동계열"), ("region", "본적 지역")] {
        if let Some(value) = arg(key) {
            text.push_str(&format!("{label}: {value}\n"));
        }
    }
    text.push('\n');
    text.push_str(SEARCH_INSTRUCTIONS);

    Ok(GetPromptResult {
        description: Some("독립유공자 정보 검색".to_string()),
        messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
    })
}
