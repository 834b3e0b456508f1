use anyhow::Context;
use sqlx::FromRow;
use time::{Date, OffsetDateTime, UtcOffset};
use uuid::Uuid;

use crate::domain::AdviceCache;

/// `day` is the local calendar day; `utc_offset_seconds` restores its midnight.
#[derive(Debug, Clone, FromRow)]
pub struct AdviceCacheRow {
    pub user_id: Uuid,
    pub day: Date,
    pub utc_offset_seconds: i32,
    pub advice: String,
    pub created_at: OffsetDateTime,
}

impl TryFrom<AdviceCacheRow> for AdviceCache {
    type Error = anyhow::Error;

    fn try_from(row: AdviceCacheRow) -> Result<Self, Self::Error> {
        let offset = UtcOffset::from_whole_seconds(row.utc_offset_seconds)
            .with_context(|| format!("advice cache offset {} out of range", row.utc_offset_seconds))?;
        Ok(AdviceCache::reconstruct(
            row.user_id,
            row.day.midnight().assume_offset(offset),
            row.advice,
            row.created_at,
        ))
    }
}
