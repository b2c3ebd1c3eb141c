//! Turns raw generator text into a validated fortune, or a typed reason why not.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::models::fortune::{FortuneContent, NewFortune};

/// Upper bound on how much raw output is echoed back in diagnostics.
pub const RAW_EXCERPT_CHARS: usize = 500;

pub const WEALTH_KEY: &str = "재물운";
pub const LOVE_KEY: &str = "연애운";
pub const HEALTH_KEY: &str = "건강운";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationParseError {
    #[error("generation output is empty")]
    Empty,

    #[error("generation output is not valid JSON: {parse_error}")]
    InvalidFormat {
        raw_excerpt: String,
        parse_error: String,
    },

    #[error("generation output is missing fortune categories: {}", .missing.join(", "))]
    Incomplete {
        missing: Vec<&'static str>,
        parsed: Value,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFortune {
    pub content: FortuneContent,
    pub lucky_color: Option<String>,
    pub lucky_number: Option<i32>,
    pub daily_tip: Option<String>,
}

impl GeneratedFortune {
    pub fn for_date(self, fortune_date: NaiveDate) -> NewFortune {
        NewFortune {
            fortune_date,
            fortune_content: self.content,
            lucky_color: self.lucky_color,
            lucky_number: self.lucky_number,
            daily_tip: self.daily_tip,
        }
    }
}

pub fn parse_generation(raw: &str) -> Result<GeneratedFortune, GenerationParseError> {
    if raw.trim().is_empty() {
        return Err(GenerationParseError::Empty);
    }

    let cleaned = strip_code_fences(raw);
    let parsed: Value =
        serde_json::from_str(&cleaned).map_err(|e| GenerationParseError::InvalidFormat {
            raw_excerpt: excerpt(raw),
            parse_error: e.to_string(),
        })?;

    let wealth = text_field(&parsed, WEALTH_KEY);
    let love = text_field(&parsed, LOVE_KEY);
    let health = text_field(&parsed, HEALTH_KEY);

    let content = match (wealth, love, health) {
        (Some(wealth), Some(love), Some(health)) => FortuneContent {
            wealth,
            love,
            health,
        },
        (wealth, love, health) => {
            let missing = [
                (WEALTH_KEY, wealth.is_none()),
                (LOVE_KEY, love.is_none()),
                (HEALTH_KEY, health.is_none()),
            ]
            .into_iter()
            .filter_map(|(key, absent)| absent.then_some(key))
            .collect();
            return Err(GenerationParseError::Incomplete { missing, parsed });
        }
    };

    Ok(GeneratedFortune {
        content,
        lucky_color: text_field(&parsed, "lucky_color"),
        lucky_number: lucky_number(&parsed),
        daily_tip: text_field(&parsed, "daily_tip"),
    })
}

/// Drop every ```` ```json ```` and ```` ``` ```` marker, each with at most one
/// trailing newline.
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

fn excerpt(raw: &str) -> String {
    raw.chars().take(RAW_EXCERPT_CHARS).collect()
}

/// A non-blank string field, kept verbatim.
fn text_field(parsed: &Value, key: &str) -> Option<String> {
    parsed
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

fn lucky_number(parsed: &Value) -> Option<i32> {
    let number = match parsed.get("lucky_number")? {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    i32::try_from(number).ok().filter(|n| *n > 0)
}
