pub mod calendar;
pub mod diary;
pub mod fortune;
pub mod health;
pub mod photos;
pub mod profile;
pub mod reset;

use chrono::{Datelike, NaiveDate};

use crate::error::{AppError, AppResult};
use crate::models::DateRangeQuery;
use crate::services::calendar::{local_today, month_range};

/// Parse a `YYYY-MM-DD` date key.
pub(crate) fn parse_date_key(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", raw)))
}

/// Resolve a listing range, defaulting each missing bound to the current month.
pub(crate) fn resolve_range(query: &DateRangeQuery) -> AppResult<(NaiveDate, NaiveDate)> {
    let today = local_today();
    let (month_start, month_end) = month_range(today.year(), today.month())
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("no month range for {today}")))?;

    let start = query.start_date.unwrap_or(month_start);
    let end = query.end_date.unwrap_or(month_end);
    if start > end {
        return Err(AppError::Validation(
            "start_date must not be after end_date".into(),
        ));
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_key() {
        assert_eq!(
            parse_date_key("2025-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(parse_date_key("2025-02-30").is_err());
        assert!(parse_date_key("28/02/2025").is_err());
    }

    #[test]
    fn test_resolve_range_rejects_inverted_bounds() {
        let query = DateRangeQuery {
            start_date: NaiveDate::from_ymd_opt(2025, 5, 31),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 1),
        };
        assert!(matches!(resolve_range(&query), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_resolve_range_defaults_to_current_month() {
        let query = DateRangeQuery {
            start_date: None,
            end_date: None,
        };
        let (start, end) = resolve_range(&query).unwrap();
        assert_eq!(start.day(), 1);
        assert_eq!(start.month(), end.month());
        assert!(start <= local_today() && local_today() <= end);
    }
}
