use chrono::{Datelike, Local, NaiveDate};

/// Today's date key in the server's local time zone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// First and last day of a month, or `None` for an invalid year/month.
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    Some((start, end))
}

/// Empty grid cells before the first day of a Sunday-first week row.
pub fn leading_blanks(first_day: NaiveDate) -> u32 {
    first_day.weekday().num_days_from_sunday()
}
