use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    advice::{repo::PgAdviceCacheRepository, AdviceGenerator, RuleBasedAdvisor},
    auth::repo::PgSessionRepository,
    config::AppConfig,
    db::PgTransactionManager,
    domain::{
        ports::{
            AdviceCacheRepository, RecordPfcRepository, RecordRepository, SessionRepository,
            TransactionManager, UserRepository,
        },
        Clock, SystemClock,
    },
    records::repo::{PgRecordPfcRepository, PgRecordRepository},
    users::repo::PgUserRepository,
};

/// Everything a handler needs; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub records: Arc<dyn RecordRepository>,
    pub record_pfcs: Arc<dyn RecordPfcRepository>,
    pub advice: Arc<dyn AdviceCacheRepository>,
    pub advisor: Arc<dyn AdviceGenerator>,
    pub transactions: Arc<dyn TransactionManager>,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<(Self, sqlx::PgPool)> {
        let db = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await
            .context("connect to database")?;
        let clock = Arc::new(SystemClock::new(config.utc_offset()?));

        let state = Self {
            clock,
            users: Arc::new(PgUserRepository::new(db.clone())),
            sessions: Arc::new(PgSessionRepository::new(db.clone())),
            records: Arc::new(PgRecordRepository::new(db.clone())),
            record_pfcs: Arc::new(PgRecordPfcRepository::new(db.clone())),
            advice: Arc::new(PgAdviceCacheRepository::new(db.clone())),
            advisor: Arc::new(RuleBasedAdvisor),
            transactions: Arc::new(PgTransactionManager::new(db.clone())),
        };
        Ok((state, db))
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}
