use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;

use super::repo_types::AdviceCacheRow;
use crate::domain::{ports::AdviceCacheRepository, AdviceCache, UserId};

pub struct PgAdviceCacheRepository {
    db: PgPool,
}

impl PgAdviceCacheRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdviceCacheRepository for PgAdviceCacheRepository {
    async fn save(&self, cache: &AdviceCache) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO advice_caches (user_id, day, utc_offset_seconds, advice, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, day) DO UPDATE
               SET advice = EXCLUDED.advice,
                   created_at = EXCLUDED.created_at
            "#,
        )
        .bind(cache.user_id().as_uuid())
        .bind(cache.date())
        .bind(cache.day().offset().whole_seconds())
        .bind(cache.advice())
        .bind(cache.created_at())
        .execute(&self.db)
        .await
        .context("upsert advice cache")?;
        Ok(())
    }

    async fn find(&self, user_id: UserId, day: Date) -> anyhow::Result<Option<AdviceCache>> {
        let row = sqlx::query_as::<_, AdviceCacheRow>(
            r#"
            SELECT user_id, day, utc_offset_seconds, advice, created_at
              FROM advice_caches
             WHERE user_id = $1 AND day = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(day)
        .fetch_optional(&self.db)
        .await
        .context("find advice cache")?;
        row.map(AdviceCache::try_from).transpose()
    }
}
