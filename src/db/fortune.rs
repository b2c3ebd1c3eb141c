use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;

use super::PgStore;
use crate::models::fortune::{DailyFortune, NewFortune};
use crate::ports::{FortuneStore, StoreError};

#[async_trait]
impl FortuneStore for PgStore {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DailyFortune>, StoreError> {
        let fortune = sqlx::query_as::<_, DailyFortune>(
            "SELECT * FROM daily_fortunes WHERE fortune_date = $1",
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fortune)
    }

    async fn insert(&self, fortune: &NewFortune) -> Result<DailyFortune, StoreError> {
        let inserted = sqlx::query_as::<_, DailyFortune>(
            r#"
            INSERT INTO daily_fortunes (fortune_date, fortune_content, lucky_color, lucky_number, daily_tip)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(fortune.fortune_date)
        .bind(Json(&fortune.fortune_content))
        .bind(&fortune.lucky_color)
        .bind(fortune.lucky_number)
        .bind(&fortune.daily_tip)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    async fn list_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyFortune>, StoreError> {
        let fortunes = sqlx::query_as::<_, DailyFortune>(
            r#"
            SELECT * FROM daily_fortunes
            WHERE fortune_date BETWEEN $1 AND $2
            ORDER BY fortune_date DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(fortunes)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM daily_fortunes")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
