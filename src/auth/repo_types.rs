use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{DomainError, Session};

/// Session row in the database, keyed by the base64 token.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl TryFrom<SessionRow> for Session {
    type Error = DomainError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Session::reconstruct(&row.id, row.user_id, row.expires_at, row.created_at)
    }
}
