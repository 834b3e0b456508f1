//! Repository ports implemented by the persistence adapters.
//!
//! Each operation works on one fully constructed aggregate or a lookup key.
//! Adapters surface their own I/O failures as `anyhow::Error`.

use async_trait::async_trait;
use thiserror::Error;
use time::{Date, OffsetDateTime};

use super::{AdviceCache, Email, Record, RecordId, RecordPfc, Session, SessionId, User, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or overwrite by id.
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &Email) -> anyhow::Result<Option<User>>;
    async fn exists_by_email(&self, email: &Email) -> anyhow::Result<bool>;
    async fn delete_by_id(&self, id: UserId) -> anyhow::Result<()>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save(&self, session: &Session) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: &SessionId) -> anyhow::Result<Option<Session>>;
    async fn delete_by_id(&self, id: &SessionId) -> anyhow::Result<()>;
}

#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Writes the record and all of its items atomically.
    async fn save(&self, record: &Record) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: RecordId) -> anyhow::Result<Option<Record>>;
    /// Records of `user_id` eaten in `[from, to)`, oldest first.
    async fn find_by_user_between(
        &self,
        user_id: UserId,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> anyhow::Result<Vec<Record>>;
    /// Also removes the record's items and PFC.
    async fn delete_by_id(&self, id: RecordId) -> anyhow::Result<()>;
}

#[async_trait]
pub trait RecordPfcRepository: Send + Sync {
    async fn save(&self, pfc: &RecordPfc) -> anyhow::Result<()>;
    async fn find_by_record_id(&self, record_id: RecordId) -> anyhow::Result<Option<RecordPfc>>;
}

#[async_trait]
pub trait AdviceCacheRepository: Send + Sync {
    async fn save(&self, cache: &AdviceCache) -> anyhow::Result<()>;
    async fn find(&self, user_id: UserId, day: Date) -> anyhow::Result<Option<AdviceCache>>;
}

/// One aggregate to persist as part of a unit of work.
#[derive(Debug, Clone, Copy)]
pub enum Write<'a> {
    User(&'a User),
    Session(&'a Session),
    /// The record together with all of its items.
    Record(&'a Record),
    RecordPfc(&'a RecordPfc),
}

#[derive(Debug, Error)]
pub enum WriteError {
    /// Another user already holds the email.
    #[error("email already registered")]
    EmailTaken,
    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

/// Runs a unit of work: every write is committed, or none is.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn execute(&self, writes: &[Write<'_>]) -> Result<(), WriteError>;
}
