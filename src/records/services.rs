use time::{Date, Duration, OffsetDateTime};
use tracing::info;

use crate::{
    domain::{
        nutrition,
        ports::Write,
        statistics::{calorie_statistics, CalorieStatistics},
        DomainError, NewRecordItem, Pfc, Record, RecordId, RecordPfc, StatisticsPeriod, UserId,
        ValidationErrors,
    },
    error::AppResult,
    state::AppState,
    users,
};

/// Optional macro breakdown supplied with a new record, in grams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PfcInput {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// A record together with its PFC, when one was logged.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordView {
    pub record: Record,
    pub pfc: Option<RecordPfc>,
}

/// Validates the record and the PFC together, reporting every failure.
///
/// The record, its items and the PFC are stored all together or not at all.
pub async fn create_record(
    state: &AppState,
    user_id: UserId,
    eaten_at: OffsetDateTime,
    items: &[NewRecordItem<'_>],
    pfc: Option<PfcInput>,
) -> AppResult<RecordView> {
    let mut errors = ValidationErrors::new();
    let record = match Record::new(user_id, eaten_at, items, state.clock()) {
        Ok(record) => Some(record),
        Err(record_errors) => {
            errors.extend(record_errors);
            None
        }
    };
    let pfc = match pfc {
        Some(p) => errors.collect(Pfc::new(p.protein, p.fat, p.carbs)).map(Some),
        None => Some(None),
    };
    let (Some(record), Some(pfc)) = (record, pfc) else {
        return Err(errors.into());
    };

    let pfc = pfc
        .map(|p| RecordPfc::new(record.id(), p.protein(), p.fat(), p.carbs()))
        .transpose()?;
    let mut writes = vec![Write::Record(&record)];
    writes.extend(pfc.as_ref().map(Write::RecordPfc));
    state.transactions.execute(&writes).await?;

    info!(
        user_id = %user_id,
        record_id = %record.id(),
        kcal = record.total_calories().kcal(),
        "record created"
    );
    Ok(RecordView { record, pfc })
}

/// Records eaten on local days `from..=to`, oldest first.
///
/// Both bounds default to today; a lone `from` runs to today.
pub async fn list_records(
    state: &AppState,
    user_id: UserId,
    from: Option<Date>,
    to: Option<Date>,
) -> AppResult<Vec<Record>> {
    let today = state.clock().today();
    let to = to.unwrap_or(today);
    let from = from.unwrap_or(to);
    if from > to {
        return Err(DomainError::InvalidDateRange.into());
    }
    records_between(state, user_id, from, to).await
}

pub async fn get_record(state: &AppState, user_id: UserId, raw_id: &str) -> AppResult<RecordView> {
    let record = owned_record(state, user_id, raw_id).await?;
    let pfc = state.record_pfcs.find_by_record_id(record.id()).await?;
    Ok(RecordView { record, pfc })
}

pub async fn delete_record(state: &AppState, user_id: UserId, raw_id: &str) -> AppResult<()> {
    let record = owned_record(state, user_id, raw_id).await?;
    state.records.delete_by_id(record.id()).await?;
    info!(user_id = %user_id, record_id = %record.id(), "record deleted");
    Ok(())
}

/// Daily calorie totals over `period` ending today, judged against the
/// user's current target.
pub async fn statistics(
    state: &AppState,
    user_id: UserId,
    raw_period: &str,
) -> AppResult<CalorieStatistics> {
    let period = StatisticsPeriod::new(raw_period)?;
    let user = users::services::profile(state, user_id).await?;
    let today = state.clock().today();
    let target = nutrition::target_calories(&user, today);

    let records = records_between(state, user_id, period.start(today), today).await?;
    Ok(calorie_statistics(&records, target, period, state.clock()))
}

pub(crate) async fn records_between(
    state: &AppState,
    user_id: UserId,
    from: Date,
    to: Date,
) -> AppResult<Vec<Record>> {
    let clock = state.clock();
    let records = state
        .records
        .find_by_user_between(
            user_id,
            clock.start_of(from),
            clock.start_of(to) + Duration::days(1),
        )
        .await?;
    Ok(records)
}

/// Someone else's record is reported as missing, not forbidden.
async fn owned_record(state: &AppState, user_id: UserId, raw_id: &str) -> AppResult<Record> {
    let id = RecordId::parse(raw_id)?;
    let record = state
        .records
        .find_by_id(id)
        .await?
        .filter(|r| r.is_owned_by(user_id))
        .ok_or(DomainError::RecordNotFound)?;
    Ok(record)
}
