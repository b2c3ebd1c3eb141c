use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use super::{parse_date_key, resolve_range};
use crate::error::{AppError, AppResult};
use crate::models::diary::{DiaryEntry, DiaryUpsert, UpsertDiaryRequest};
use crate::models::DateRangeQuery;
use crate::AppState;

pub async fn get_diary_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<DiaryEntry>> {
    let date = parse_date_key(&date)?;
    let entry = state
        .diary
        .find_by_date(date)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No diary entry for {date}")))?;

    Ok(Json(entry))
}

/// Replace the entry for a date. Omitted fields are cleared, but at least
/// one of emotion or photo must be given.
pub async fn upsert_diary_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<UpsertDiaryRequest>,
) -> AppResult<Json<DiaryEntry>> {
    let entry_date = parse_date_key(&date)?;
    body.validate()?;
    if body.emotion.is_none() && body.photo_url.is_none() {
        return Err(AppError::Validation(
            "A diary entry needs an emotion or a photo".into(),
        ));
    }

    let entry = state
        .diary
        .upsert(&DiaryUpsert {
            entry_date,
            emotion: body.emotion,
            photo_url: body.photo_url,
        })
        .await?;

    Ok(Json(entry))
}

pub async fn list_diary_entries(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<DiaryEntry>>> {
    let (start, end) = resolve_range(&query)?;
    let entries = state.diary.list_range(start, end).await?;
    Ok(Json(entries))
}
