use async_trait::async_trait;

use super::PgStore;
use crate::models::profile::{ProfileInput, SajuProfile, PROFILE_ID};
use crate::ports::{ProfileStore, StoreError};

#[async_trait]
impl ProfileStore for PgStore {
    async fn load(&self) -> Result<Option<SajuProfile>, StoreError> {
        let profile = sqlx::query_as::<_, SajuProfile>("SELECT * FROM saju_profile WHERE id = $1")
            .bind(PROFILE_ID)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    async fn save(&self, input: &ProfileInput) -> Result<SajuProfile, StoreError> {
        let profile = sqlx::query_as::<_, SajuProfile>(
            r#"
            INSERT INTO saju_profile (id, birth_date, birth_time, saju_data, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (id) DO UPDATE SET
                birth_date = EXCLUDED.birth_date,
                birth_time = EXCLUDED.birth_time,
                saju_data = EXCLUDED.saju_data,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(PROFILE_ID)
        .bind(input.birth_date)
        .bind(input.birth_time)
        .bind(&input.saju_data)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM saju_profile WHERE id = $1")
            .bind(PROFILE_ID)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
