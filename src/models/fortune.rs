use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The three fortune categories, stored as one JSONB document keyed in Korean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FortuneContent {
    #[serde(rename = "재물운")]
    pub wealth: String,
    #[serde(rename = "연애운")]
    pub love: String,
    #[serde(rename = "건강운")]
    pub health: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct DailyFortune {
    pub fortune_date: NaiveDate,
    #[sqlx(json)]
    pub fortune_content: FortuneContent,
    pub lucky_color: Option<String>,
    pub lucky_number: Option<i32>,
    pub daily_tip: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated generation result, ready to be inserted for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFortune {
    pub fortune_date: NaiveDate,
    pub fortune_content: FortuneContent,
    pub lucky_color: Option<String>,
    pub lucky_number: Option<i32>,
    pub daily_tip: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FortuneRequest {
    /// `YYYY-MM-DD`; today when absent.
    pub date: Option<String>,
}
