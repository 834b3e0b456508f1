use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    auth::repo::upsert_session,
    domain::ports::{TransactionManager, Write, WriteError},
    records::repo::{upsert_record_pfc, write_record},
    users::repo::upsert_user,
};

/// Applies a unit of work inside one Postgres transaction.
///
/// Dropping the transaction on an early return rolls everything back.
pub struct PgTransactionManager {
    db: PgPool,
}

impl PgTransactionManager {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionManager for PgTransactionManager {
    async fn execute(&self, writes: &[Write<'_>]) -> Result<(), WriteError> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        for write in writes {
            match *write {
                Write::User(user) => upsert_user(&mut *tx, user).await?,
                Write::Session(session) => upsert_session(&mut *tx, session).await?,
                Write::Record(record) => write_record(&mut *tx, record).await?,
                Write::RecordPfc(pfc) => upsert_record_pfc(&mut *tx, pfc).await?,
            }
        }
        tx.commit().await.context("commit tx")?;
        Ok(())
    }
}
