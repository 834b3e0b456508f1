use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::repo_types::UserRow;
use crate::domain::{
    ports::{UserRepository, WriteError},
    Email, User, UserId,
};

const SELECT_USER: &str = r#"
    SELECT id, email, password_hash, nickname, weight_kg, height_cm,
           birth_date, gender, activity_level, created_at, updated_at
      FROM users
"#;

/// Insert or overwrite by id; a clash on `email` is [`WriteError::EmailTaken`].
pub(crate) async fn upsert_user(conn: &mut PgConnection, user: &User) -> Result<(), WriteError> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, nickname, weight_kg, height_cm,
                           birth_date, gender, activity_level, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (id) DO UPDATE
           SET email = EXCLUDED.email,
               password_hash = EXCLUDED.password_hash,
               nickname = EXCLUDED.nickname,
               weight_kg = EXCLUDED.weight_kg,
               height_cm = EXCLUDED.height_cm,
               birth_date = EXCLUDED.birth_date,
               gender = EXCLUDED.gender,
               activity_level = EXCLUDED.activity_level,
               updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(user.id().as_uuid())
    .bind(user.email().as_str())
    .bind(user.password_hash().as_str())
    .bind(user.nickname().as_str())
    .bind(user.weight().kg())
    .bind(user.height().cm())
    .bind(user.birth_date().date())
    .bind(user.gender().as_str())
    .bind(user.activity_level().as_str())
    .bind(user.created_at())
    .bind(user.updated_at())
    .execute(&mut *conn)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(WriteError::EmailTaken),
        Err(e) => Err(anyhow::Error::new(e).context("upsert user").into()),
    }
}

pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn save(&self, user: &User) -> anyhow::Result<()> {
        let mut conn = self.db.acquire().await.context("acquire connection")?;
        upsert_user(&mut conn, user).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.db)
            .await
            .context("find user by id")?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(&self.db)
            .await
            .context("find user by email")?;
        row.map(User::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> anyhow::Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.db)
                .await
                .context("check email exists")?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: UserId) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.db)
            .await
            .context("delete user")?;
        Ok(())
    }
}
