use anyhow::Context;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{Record, RecordItem, RecordPfc};

#[derive(Debug, Clone, FromRow)]
pub struct RecordRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub eaten_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct RecordItemRow {
    pub id: Uuid,
    pub record_id: Uuid,
    pub name: String,
    pub calories: i32,
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct RecordPfcRow {
    pub record_id: Uuid,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl TryFrom<RecordItemRow> for RecordItem {
    type Error = anyhow::Error;

    fn try_from(row: RecordItemRow) -> Result<Self, Self::Error> {
        let calories = u32::try_from(row.calories)
            .with_context(|| format!("record item {} has negative calories", row.id))?;
        Ok(RecordItem::reconstruct(row.id, row.name, calories))
    }
}

impl From<RecordPfcRow> for RecordPfc {
    fn from(row: RecordPfcRow) -> Self {
        RecordPfc::reconstruct(row.record_id, row.protein, row.fat, row.carbs)
    }
}

/// Joins a record row with its item rows, in stored order.
pub fn assemble(row: RecordRow, items: Vec<RecordItemRow>) -> anyhow::Result<Record> {
    let items = items
        .into_iter()
        .map(RecordItem::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;
    anyhow::ensure!(!items.is_empty(), "record {} has no items", row.id);
    Ok(Record::reconstruct(
        row.id,
        row.user_id,
        row.eaten_at,
        items,
        row.created_at,
    ))
}
