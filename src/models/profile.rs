use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;

/// Fixed primary key of the one and only profile row.
pub const PROFILE_ID: i16 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SajuProfile {
    pub id: i16,
    pub birth_date: NaiveDate,
    pub birth_time: NaiveTime,
    /// Opaque birth-chart payload forwarded verbatim to the generator.
    pub saju_data: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

/// Validated values written by `ProfileStore::save`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileInput {
    pub birth_date: NaiveDate,
    pub birth_time: NaiveTime,
    pub saju_data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct SaveProfileRequest {
    pub birth_date: NaiveDate,
    /// `HH:MM` as sent by a time input, or `HH:MM:SS`.
    pub birth_time: String,
    pub saju_data: Option<serde_json::Value>,
}

impl SaveProfileRequest {
    pub fn into_input(self) -> Result<ProfileInput, String> {
        let raw_time = self.birth_time.trim();
        let birth_time = parse_birth_time(raw_time)
            .ok_or_else(|| format!("Invalid birth_time '{}': expected HH:MM or HH:MM:SS", raw_time))?;

        let saju_data = match self.saju_data {
            Some(value) if !value.is_null() => value,
            _ => json!({
                "birthDate": self.birth_date.format("%Y-%m-%d").to_string(),
                "birthTime": raw_time,
            }),
        };

        Ok(ProfileInput {
            birth_date: self.birth_date,
            birth_time,
            saju_data,
        })
    }
}

fn parse_birth_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}
