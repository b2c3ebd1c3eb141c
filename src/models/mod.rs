pub mod diary;
pub mod fortune;
pub mod profile;

use chrono::NaiveDate;
use serde::Deserialize;

/// Closed `[start_date, end_date]` interval used by the listing endpoints.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
