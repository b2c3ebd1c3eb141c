use async_trait::async_trait;
use chrono::NaiveDate;

use super::PgStore;
use crate::models::diary::{DiaryEntry, DiaryUpsert};
use crate::ports::{DiaryStore, StoreError};

#[async_trait]
impl DiaryStore for PgStore {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>, StoreError> {
        let entry = sqlx::query_as::<_, DiaryEntry>("SELECT * FROM diary_entries WHERE entry_date = $1")
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    async fn upsert(&self, entry: &DiaryUpsert) -> Result<DiaryEntry, StoreError> {
        // Both columns are replaced: a null clears the previous value.
        let stored = sqlx::query_as::<_, DiaryEntry>(
            r#"
            INSERT INTO diary_entries (entry_date, emotion, photo_url)
            VALUES ($1, $2, $3)
            ON CONFLICT (entry_date) DO UPDATE SET
                emotion = EXCLUDED.emotion,
                photo_url = EXCLUDED.photo_url,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(entry.entry_date)
        .bind(entry.emotion)
        .bind(&entry.photo_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn list_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DiaryEntry>, StoreError> {
        let entries = sqlx::query_as::<_, DiaryEntry>(
            r#"
            SELECT * FROM diary_entries
            WHERE entry_date BETWEEN $1 AND $2
            ORDER BY entry_date DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM diary_entries")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
