use uuid::Uuid;

use super::{DomainError, Pfc, RecordId};

/// Macronutrient breakdown of one record, keyed 1:1 by the record id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordPfc {
    record_id: RecordId,
    pfc: Pfc,
}

impl RecordPfc {
    pub fn new(record_id: RecordId, protein: f64, fat: f64, carbs: f64) -> Result<Self, DomainError> {
        Ok(Self {
            record_id,
            pfc: Pfc::new(protein, fat, carbs)?,
        })
    }

    pub fn reconstruct(record_id: Uuid, protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            record_id: RecordId::reconstruct(record_id),
            pfc: Pfc::reconstruct(protein, fat, carbs),
        }
    }

    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    pub fn pfc(&self) -> Pfc {
        self.pfc
    }
}
