use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{assemble, RecordItemRow, RecordPfcRow, RecordRow};
use crate::domain::{
    ports::{RecordPfcRepository, RecordRepository},
    Record, RecordId, RecordPfc, UserId,
};

pub struct PgRecordRepository {
    db: PgPool,
}

impl PgRecordRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn items_of(&self, record_ids: &[Uuid]) -> anyhow::Result<Vec<RecordItemRow>> {
        let rows = sqlx::query_as::<_, RecordItemRow>(
            r#"
            SELECT id, record_id, name, calories
              FROM record_items
             WHERE record_id = ANY($1)
             ORDER BY record_id, position
            "#,
        )
        .bind(record_ids)
        .fetch_all(&self.db)
        .await
        .context("select record items")?;
        Ok(rows)
    }
}

/// Upserts the record row and replaces its items. Callers own the transaction.
pub(crate) async fn write_record(conn: &mut PgConnection, record: &Record) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO records (id, user_id, eaten_at, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE SET eaten_at = EXCLUDED.eaten_at
        "#,
    )
    .bind(record.id().as_uuid())
    .bind(record.user_id().as_uuid())
    .bind(record.eaten_at().value())
    .bind(record.created_at())
    .execute(&mut *conn)
    .await
    .context("upsert record")?;

    sqlx::query("DELETE FROM record_items WHERE record_id = $1")
        .bind(record.id().as_uuid())
        .execute(&mut *conn)
        .await
        .context("clear record items")?;

    for (position, item) in record.items().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO record_items (id, record_id, position, name, calories)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(record.id().as_uuid())
        .bind(i32::try_from(position).context("too many record items")?)
        .bind(item.name().as_str())
        .bind(i32::try_from(item.calories().kcal()).context("calories out of range")?)
        .execute(&mut *conn)
        .await
        .with_context(|| format!("insert record item {}", item.id()))?;
    }
    Ok(())
}

pub(crate) async fn upsert_record_pfc(conn: &mut PgConnection, pfc: &RecordPfc) -> anyhow::Result<()> {
    let grams = pfc.pfc();
    sqlx::query(
        r#"
        INSERT INTO record_pfcs (record_id, protein, fat, carbs)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (record_id) DO UPDATE
           SET protein = EXCLUDED.protein,
               fat = EXCLUDED.fat,
               carbs = EXCLUDED.carbs
        "#,
    )
    .bind(pfc.record_id().as_uuid())
    .bind(grams.protein())
    .bind(grams.fat())
    .bind(grams.carbs())
    .execute(&mut *conn)
    .await
    .context("upsert record pfc")?;
    Ok(())
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    async fn save(&self, record: &Record) -> anyhow::Result<()> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        write_record(&mut *tx, record).await?;
        tx.commit().await.context("commit tx")?;
        Ok(())
    }

    async fn find_by_id(&self, id: RecordId) -> anyhow::Result<Option<Record>> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT id, user_id, eaten_at, created_at
              FROM records
             WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.db)
        .await
        .context("find record by id")?;

        let Some(row) = row else {
            return Ok(None);
        };
        let items = self.items_of(&[row.id]).await?;
        assemble(row, items).map(Some)
    }

    async fn find_by_user_between(
        &self,
        user_id: UserId,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> anyhow::Result<Vec<Record>> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT id, user_id, eaten_at, created_at
              FROM records
             WHERE user_id = $1
               AND eaten_at >= $2
               AND eaten_at < $3
             ORDER BY eaten_at ASC
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await
        .context("list records by user")?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut items: HashMap<Uuid, Vec<RecordItemRow>> = HashMap::new();
        for item in self.items_of(&ids).await? {
            items.entry(item.record_id).or_default().push(item);
        }

        rows.into_iter()
            .map(|row| {
                let own = items.remove(&row.id).unwrap_or_default();
                assemble(row, own)
            })
            .collect()
    }

    async fn delete_by_id(&self, id: RecordId) -> anyhow::Result<()> {
        // items and pfc go with it (ON DELETE CASCADE)
        sqlx::query("DELETE FROM records WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.db)
            .await
            .context("delete record")?;
        Ok(())
    }
}

pub struct PgRecordPfcRepository {
    db: PgPool,
}

impl PgRecordPfcRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordPfcRepository for PgRecordPfcRepository {
    async fn save(&self, pfc: &RecordPfc) -> anyhow::Result<()> {
        let mut conn = self.db.acquire().await.context("acquire connection")?;
        upsert_record_pfc(&mut conn, pfc).await
    }

    async fn find_by_record_id(&self, record_id: RecordId) -> anyhow::Result<Option<RecordPfc>> {
        let row = sqlx::query_as::<_, RecordPfcRow>(
            "SELECT record_id, protein, fat, carbs FROM record_pfcs WHERE record_id = $1",
        )
        .bind(record_id.as_uuid())
        .fetch_optional(&self.db)
        .await
        .context("find record pfc")?;
        Ok(row.map(RecordPfc::from))
    }
}
