use chrono::NaiveDate;
use serde_json::json;

use crate::ports::GenerationPrompt;

pub const PERSONA_INSTRUCTION: &str = "너는 한국어로만 대답하는 사주 운세 챗봇이야. \
친근하지만 과장되게 불안감을 조장하지 말고, 현실적인 조언을 짧게 해줘.";

pub const FORMAT_INSTRUCTION: &str = "아래 입력을 바탕으로 JSON 하나만 생성해. \
키는 재물운, 연애운, 건강운, lucky_color, lucky_number, daily_tip 이고, \
각 운세는 2문장 이내의 한국어 문장으로 작성해. \
lucky_number는 1~99 사이의 정수 하나만, lucky_color는 한국어 색상 이름 한 단어로. \
반드시 유효한 JSON 형식으로만 응답해.";

pub fn build_prompt(date: NaiveDate, saju_data: &serde_json::Value) -> GenerationPrompt {
    let payload = json!({
        "date": date.format("%Y-%m-%d").to_string(),
        "saju": saju_data,
    });

    GenerationPrompt {
        system: PERSONA_INSTRUCTION.to_string(),
        developer: FORMAT_INSTRUCTION.to_string(),
        user: payload.to_string(),
    }
}
