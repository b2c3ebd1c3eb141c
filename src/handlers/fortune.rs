use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{parse_date_key, resolve_range};
use crate::error::{AppError, AppResult};
use crate::models::fortune::{DailyFortune, FortuneRequest};
use crate::models::DateRangeQuery;
use crate::services::calendar::local_today;
use crate::AppState;

/// Fetch the fortune for a date, generating and caching it on first request.
///
/// A missing or unparseable body means "today".
pub async fn today_fortune(
    State(state): State<AppState>,
    body: Option<Json<FortuneRequest>>,
) -> AppResult<Json<DailyFortune>> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let date = match request.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => parse_date_key(raw)?,
        _ => local_today(),
    };

    let fortune = state.fortune_service.fetch_or_generate(date).await?;
    Ok(Json(fortune))
}

pub async fn get_fortune(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<DailyFortune>> {
    let date = parse_date_key(&date)?;
    let fortune = state
        .fortunes
        .find_by_date(date)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No fortune for {date}")))?;

    Ok(Json(fortune))
}

pub async fn list_fortunes(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<DailyFortune>>> {
    let (start, end) = resolve_range(&query)?;
    let fortunes = state.fortunes.list_range(start, end).await?;
    Ok(Json(fortunes))
}
