//! Meal record aggregate and its line items.

use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    Calories, Clock, DomainError, EatenAt, ItemName, RecordId, RecordItemId, UserId,
    ValidationErrors,
};

/// Raw input for one line item.
#[derive(Debug, Clone, Copy)]
pub struct NewRecordItem<'a> {
    pub name: &'a str,
    pub calories: i64,
}

/// One food in a record. Not addressable outside its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordItem {
    id: RecordItemId,
    name: ItemName,
    calories: Calories,
}

impl RecordItem {
    pub fn new(input: NewRecordItem<'_>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.collect(ItemName::new(input.name));
        let calories = errors.collect(Calories::new(input.calories));

        let (Some(name), Some(calories)) = (name, calories) else {
            return Err(errors);
        };
        Ok(Self {
            id: RecordItemId::generate(),
            name,
            calories,
        })
    }

    pub fn reconstruct(id: Uuid, name: String, calories: u32) -> Self {
        Self {
            id: RecordItemId::reconstruct(id),
            name: ItemName::reconstruct(name),
            calories: Calories::reconstruct(calories),
        }
    }

    pub fn id(&self) -> RecordItemId {
        self.id
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn calories(&self) -> Calories {
        self.calories
    }
}

/// A meal eaten at one point in time.
///
/// ## Invariants
/// - holds at least one item;
/// - `eaten_at` was not in the future when the record was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    user_id: UserId,
    eaten_at: EatenAt,
    items: Vec<RecordItem>,
    created_at: OffsetDateTime,
}

impl Record {
    /// Validate the timestamp and every item, reporting all failures.
    ///
    /// An empty item list short-circuits with a single
    /// [`DomainError::RecordItemsRequired`].
    pub fn new(
        user_id: UserId,
        eaten_at: OffsetDateTime,
        items: &[NewRecordItem<'_>],
        clock: &dyn Clock,
    ) -> Result<Self, ValidationErrors> {
        if items.is_empty() {
            return Err(DomainError::RecordItemsRequired.into());
        }

        let mut errors = ValidationErrors::new();
        let eaten_at = errors.collect(EatenAt::new(eaten_at, clock));
        let mut built = Vec::with_capacity(items.len());
        for item in items {
            match RecordItem::new(*item) {
                Ok(item) => built.push(item),
                Err(item_errors) => errors.extend(item_errors),
            }
        }

        let Some(eaten_at) = eaten_at else {
            return Err(errors);
        };
        if errors.has_any() {
            return Err(errors);
        }

        Ok(Self {
            id: RecordId::generate(),
            user_id,
            eaten_at,
            items: built,
            created_at: clock.now(),
        })
    }

    pub fn reconstruct(
        id: Uuid,
        user_id: Uuid,
        eaten_at: OffsetDateTime,
        items: Vec<RecordItem>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: RecordId::reconstruct(id),
            user_id: UserId::reconstruct(user_id),
            eaten_at: EatenAt::reconstruct(eaten_at),
            items,
            created_at,
        }
    }

    pub fn total_calories(&self) -> Calories {
        self.items.iter().map(RecordItem::calories).sum()
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn eaten_at(&self) -> EatenAt {
        self.eaten_at
    }

    pub fn items(&self) -> &[RecordItem] {
        &self.items
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}
