use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::repo_types::SessionRow;
use crate::domain::{ports::SessionRepository, Session, SessionId};

pub(crate) async fn upsert_session(
    conn: &mut PgConnection,
    session: &Session,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO sessions (id, user_id, expires_at, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE SET expires_at = EXCLUDED.expires_at
        "#,
    )
    .bind(session.id().as_str())
    .bind(session.user_id().as_uuid())
    .bind(session.expires_at())
    .bind(session.created_at())
    .execute(&mut *conn)
    .await
    .context("insert session")?;
    Ok(())
}

pub struct PgSessionRepository {
    db: PgPool,
}

impl PgSessionRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn save(&self, session: &Session) -> anyhow::Result<()> {
        let mut conn = self.db.acquire().await.context("acquire connection")?;
        upsert_session(&mut conn, session).await
    }

    async fn find_by_id(&self, id: &SessionId) -> anyhow::Result<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, expires_at, created_at
              FROM sessions
             WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.db)
        .await
        .context("find session by id")?;

        row.map(Session::try_from)
            .transpose()
            .context("corrupted session row")
    }

    async fn delete_by_id(&self, id: &SessionId) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.db)
            .await
            .context("delete session")?;
        Ok(())
    }
}
