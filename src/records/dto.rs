use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::services::{PfcInput, RecordView};
use crate::{
    domain::{statistics::CalorieStatistics, NewRecordItem, Record, RecordItem},
    users::dto::PfcResponse,
};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Deserialize)]
pub struct RecordItemRequest {
    pub name: String,
    pub calories: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PfcRequest {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    #[serde(with = "time::serde::rfc3339")]
    pub eaten_at: OffsetDateTime,
    #[serde(default)]
    pub items: Vec<RecordItemRequest>,
    pub pfc: Option<PfcRequest>,
}

impl CreateRecordRequest {
    pub fn items(&self) -> Vec<NewRecordItem<'_>> {
        self.items
            .iter()
            .map(|i| NewRecordItem {
                name: &i.name,
                calories: i.calories,
            })
            .collect()
    }

    pub fn pfc(&self) -> Option<PfcInput> {
        self.pfc.map(|p| PfcInput {
            protein: p.protein,
            fat: p.fat,
            carbs: p.carbs,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    #[serde(default, with = "iso_date::option")]
    pub from: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub to: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    #[serde(default)]
    pub period: String,
}

#[derive(Debug, Serialize)]
pub struct RecordItemResponse {
    pub id: Uuid,
    pub name: String,
    pub calories: u32,
}

impl From<&RecordItem> for RecordItemResponse {
    fn from(item: &RecordItem) -> Self {
        Self {
            id: item.id().as_uuid(),
            name: item.name().as_str().to_owned(),
            calories: item.calories().kcal(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub eaten_at: OffsetDateTime,
    pub items: Vec<RecordItemResponse>,
    pub total_calories: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pfc: Option<PfcResponse>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&Record> for RecordResponse {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id().as_uuid(),
            eaten_at: record.eaten_at().value(),
            items: record.items().iter().map(RecordItemResponse::from).collect(),
            total_calories: record.total_calories().kcal(),
            pfc: None,
            created_at: record.created_at(),
        }
    }
}

impl From<RecordView> for RecordResponse {
    fn from(view: RecordView) -> Self {
        Self {
            pfc: view.pfc.map(|p| p.pfc().into()),
            ..Self::from(&view.record)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DailyCaloriesResponse {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub calories: u32,
    pub achieved: bool,
    pub over: bool,
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub period: &'static str,
    pub target_calories: u32,
    pub total_calories: u32,
    pub achieved_days: usize,
    pub over_days: usize,
    pub days: Vec<DailyCaloriesResponse>,
}

impl From<CalorieStatistics> for StatisticsResponse {
    fn from(stats: CalorieStatistics) -> Self {
        Self {
            period: stats.period.as_str(),
            target_calories: stats.target.kcal(),
            total_calories: stats.total().kcal(),
            achieved_days: stats.achieved_days(),
            over_days: stats.over_days(),
            days: stats
                .days
                .iter()
                .map(|d| DailyCaloriesResponse {
                    date: d.date,
                    calories: d.calories.kcal(),
                    achieved: d.achieved,
                    over: d.over,
                })
                .collect(),
        }
    }
}
