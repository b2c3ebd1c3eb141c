//! Request/response shapes that are not table rows.
//!
//! Conventions:
//! - `*Request` / `*Query` → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Row types (`SajuProfile`, `DailyFortune`, `DiaryEntry`) are returned as is

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::diary::DiaryEntry;
use crate::models::fortune::DailyFortune;

// ============================================================================
// Common
// ============================================================================

/// Stable error envelope — every error response uses this shape
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

// ============================================================================
// Calendar
// ============================================================================

/// GET /api/calendar
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Blank cells before day 1 in a Sunday-first grid
    pub leading_blanks: u32,
    pub fortunes: Vec<DailyFortune>,
    pub diary_entries: Vec<DiaryEntry>,
}

// ============================================================================
// Photos
// ============================================================================

/// POST /api/diary/:date/photo
#[derive(Debug, Serialize)]
pub struct PhotoUploadResponse {
    pub url: String,
}

/// DELETE /api/photos
#[derive(Debug, Deserialize, Validate)]
pub struct DeletePhotoRequest {
    #[validate(url(message = "url must be a photo URL"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct DeletePhotoResponse {
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}
