//! In-memory repository fakes for service tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use time::{Date, OffsetDateTime};

use crate::{
    advice::RuleBasedAdvisor,
    domain::{
        ports::{
            AdviceCacheRepository, RecordPfcRepository, RecordRepository, SessionRepository,
            TransactionManager, UserRepository, Write, WriteError,
        },
        AdviceCache, Clock, Email, FixedClock, Record, RecordId, RecordPfc, Session, SessionId,
        User, UserId,
    },
    state::AppState,
};

#[derive(Default)]
pub struct InMemoryUsers(Mutex<HashMap<UserId, User>>);

impl InMemoryUsers {
    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    fn email_taken_by_other(&self, user: &User) -> bool {
        self.0
            .lock()
            .unwrap()
            .values()
            .any(|u| u.email() == user.email() && u.id() != user.id())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn save(&self, user: &User) -> anyhow::Result<()> {
        self.0.lock().unwrap().insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>> {
        Ok(self.0.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> anyhow::Result<Option<User>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> anyhow::Result<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn delete_by_id(&self, id: UserId) -> anyhow::Result<()> {
        self.0.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySessions(Mutex<HashMap<SessionId, Session>>);

impl InMemorySessions {
    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn save(&self, session: &Session) -> anyhow::Result<()> {
        self.0
            .lock()
            .unwrap()
            .insert(session.id().clone(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> anyhow::Result<Option<Session>> {
        Ok(self.0.lock().unwrap().get(id).cloned())
    }

    async fn delete_by_id(&self, id: &SessionId) -> anyhow::Result<()> {
        self.0.lock().unwrap().remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRecords {
    records: Mutex<HashMap<RecordId, Record>>,
    pfcs: Mutex<HashMap<RecordId, RecordPfc>>,
}

impl InMemoryRecords {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn pfc_count(&self) -> usize {
        self.pfcs.lock().unwrap().len()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecords {
    async fn save(&self, record: &Record) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(record.id(), record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: RecordId) -> anyhow::Result<Option<Record>> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_user_between(
        &self,
        user_id: UserId,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> anyhow::Result<Vec<Record>> {
        let mut found: Vec<Record> = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.is_owned_by(user_id))
            .filter(|r| r.eaten_at().value() >= from && r.eaten_at().value() < to)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.eaten_at());
        Ok(found)
    }

    async fn delete_by_id(&self, id: RecordId) -> anyhow::Result<()> {
        self.records.lock().unwrap().remove(&id);
        self.pfcs.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[async_trait]
impl RecordPfcRepository for InMemoryRecords {
    async fn save(&self, pfc: &RecordPfc) -> anyhow::Result<()> {
        self.pfcs.lock().unwrap().insert(pfc.record_id(), *pfc);
        Ok(())
    }

    async fn find_by_record_id(&self, record_id: RecordId) -> anyhow::Result<Option<RecordPfc>> {
        Ok(self.pfcs.lock().unwrap().get(&record_id).copied())
    }
}

#[derive(Default)]
pub struct InMemoryAdvice(Mutex<HashMap<(UserId, Date), AdviceCache>>);

impl InMemoryAdvice {
    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

#[async_trait]
impl AdviceCacheRepository for InMemoryAdvice {
    async fn save(&self, cache: &AdviceCache) -> anyhow::Result<()> {
        self.0
            .lock()
            .unwrap()
            .insert((cache.user_id(), cache.date()), cache.clone());
        Ok(())
    }

    async fn find(&self, user_id: UserId, day: Date) -> anyhow::Result<Option<AdviceCache>> {
        Ok(self.0.lock().unwrap().get(&(user_id, day)).cloned())
    }
}

/// All-or-nothing unit of work over the in-memory stores.
///
/// Every write is checked before any store is touched, so a failing write
/// leaves nothing behind.
#[derive(Default)]
pub struct InMemoryTransactions {
    users: Arc<InMemoryUsers>,
    sessions: Arc<InMemorySessions>,
    records: Arc<InMemoryRecords>,
    fail_sessions: AtomicBool,
    fail_record_pfcs: AtomicBool,
}

impl InMemoryTransactions {
    pub fn fail_session_writes(&self, fail: bool) {
        self.fail_sessions.store(fail, Ordering::SeqCst);
    }

    pub fn fail_record_pfc_writes(&self, fail: bool) {
        self.fail_record_pfcs.store(fail, Ordering::SeqCst);
    }

    fn check(&self, write: &Write<'_>) -> Result<(), WriteError> {
        match write {
            Write::User(user) if self.users.email_taken_by_other(user) => {
                Err(WriteError::EmailTaken)
            }
            Write::Session(_) if self.fail_sessions.load(Ordering::SeqCst) => {
                Err(anyhow::anyhow!("session store unavailable").into())
            }
            Write::RecordPfc(_) if self.fail_record_pfcs.load(Ordering::SeqCst) => {
                Err(anyhow::anyhow!("disk full").into())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl TransactionManager for InMemoryTransactions {
    async fn execute(&self, writes: &[Write<'_>]) -> Result<(), WriteError> {
        for write in writes {
            self.check(write)?;
        }
        for write in writes {
            match *write {
                Write::User(user) => UserRepository::save(&*self.users, user).await?,
                Write::Session(session) => SessionRepository::save(&*self.sessions, session).await?,
                Write::Record(record) => RecordRepository::save(&*self.records, record).await?,
                Write::RecordPfc(pfc) => RecordPfcRepository::save(&*self.records, pfc).await?,
            }
        }
        Ok(())
    }
}

/// Fakes kept alongside the state so tests can inspect them.
pub struct TestApp {
    pub state: AppState,
    pub users: Arc<InMemoryUsers>,
    pub sessions: Arc<InMemorySessions>,
    pub records: Arc<InMemoryRecords>,
    pub advice: Arc<InMemoryAdvice>,
    pub transactions: Arc<InMemoryTransactions>,
}

pub fn test_app(now: OffsetDateTime) -> TestApp {
    test_app_with_clock(Arc::new(FixedClock(now)))
}

pub fn test_app_with_clock(clock: Arc<dyn Clock>) -> TestApp {
    let users = Arc::new(InMemoryUsers::default());
    let sessions = Arc::new(InMemorySessions::default());
    let records = Arc::new(InMemoryRecords::default());
    let advice = Arc::new(InMemoryAdvice::default());
    let transactions = Arc::new(InMemoryTransactions {
        users: users.clone(),
        sessions: sessions.clone(),
        records: records.clone(),
        ..Default::default()
    });
    let state = AppState {
        clock,
        users: users.clone(),
        sessions: sessions.clone(),
        records: records.clone(),
        record_pfcs: records.clone(),
        advice: advice.clone(),
        advisor: Arc::new(RuleBasedAdvisor),
        transactions: transactions.clone(),
    };
    TestApp {
        state,
        users,
        sessions,
        records,
        advice,
        transactions,
    }
}

/// Clone of `app.state` with a different clock, sharing the same stores.
pub fn with_clock(app: &TestApp, now: OffsetDateTime) -> AppState {
    AppState {
        clock: Arc::new(FixedClock(now)),
        ..app.state.clone()
    }
}
