use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct DiaryEntry {
    pub entry_date: NaiveDate,
    pub emotion: Option<i16>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertDiaryRequest {
    #[validate(range(min = 1, max = 5, message = "Emotion must be between 1 and 5"))]
    pub emotion: Option<i16>,
    #[validate(url(message = "photo_url must be a URL"))]
    pub photo_url: Option<String>,
}

/// Full replacement of one day's entry; `None` clears the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryUpsert {
    pub entry_date: NaiveDate,
    pub emotion: Option<i16>,
    pub photo_url: Option<String>,
}
