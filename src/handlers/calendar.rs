use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Datelike;

use crate::dto::{CalendarQuery, CalendarResponse};
use crate::error::{AppError, AppResult};
use crate::services::calendar::{leading_blanks, local_today, month_range};
use crate::AppState;

/// Fortunes and diary entries for one month; the current month by default.
pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<CalendarResponse>> {
    let today = local_today();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());
    let (start_date, end_date) = month_range(year, month)
        .ok_or_else(|| AppError::Validation(format!("Invalid month {year}-{month}")))?;

    let (fortunes, diary_entries) = tokio::try_join!(
        state.fortunes.list_range(start_date, end_date),
        state.diary.list_range(start_date, end_date),
    )?;

    Ok(Json(CalendarResponse {
        year,
        month,
        start_date,
        end_date,
        leading_blanks: leading_blanks(start_date),
        fortunes,
        diary_entries,
    }))
}
