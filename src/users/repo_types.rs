use anyhow::Context;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::domain::{ActivityLevel, Gender, User, UserParts};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub nickname: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub birth_date: Date,
    pub gender: String,
    pub activity_level: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let gender: Gender = row
            .gender
            .parse()
            .with_context(|| format!("user {} has unknown gender {:?}", row.id, row.gender))?;
        let activity_level: ActivityLevel = row.activity_level.parse().with_context(|| {
            format!(
                "user {} has unknown activity level {:?}",
                row.id, row.activity_level
            )
        })?;

        Ok(User::reconstruct(UserParts {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            nickname: row.nickname,
            weight_kg: row.weight_kg,
            height_cm: row.height_cm,
            birth_date: row.birth_date,
            gender,
            activity_level,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}
