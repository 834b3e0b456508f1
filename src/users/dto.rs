use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::services::Targets;
use crate::domain::{ProfileUpdate, User};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub weight: f64,
    pub height: f64,
    #[serde(with = "iso_date")]
    pub birth_date: Date,
    pub gender: &'static str,
    pub activity_level: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_uuid(),
            email: user.email().as_str().to_owned(),
            nickname: user.nickname().as_str().to_owned(),
            weight: user.weight().kg(),
            height: user.height().cm(),
            birth_date: user.birth_date().date(),
            gender: user.gender().as_str(),
            activity_level: user.activity_level().as_str(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub nickname: String,
    pub height: f64,
    pub weight: f64,
    pub activity_level: String,
}

impl UpdateProfileRequest {
    pub fn as_update(&self) -> ProfileUpdate<'_> {
        ProfileUpdate {
            nickname: &self.nickname,
            height_cm: self.height,
            weight_kg: self.weight,
            activity_level: &self.activity_level,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PfcResponse {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl From<crate::domain::Pfc> for PfcResponse {
    fn from(pfc: crate::domain::Pfc) -> Self {
        Self {
            protein: pfc.protein(),
            fat: pfc.fat(),
            carbs: pfc.carbs(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TargetsResponse {
    pub age: u32,
    pub bmr: f64,
    pub calories: u32,
    pub pfc: PfcResponse,
}

impl From<Targets> for TargetsResponse {
    fn from(t: Targets) -> Self {
        Self {
            age: t.age,
            bmr: t.bmr,
            calories: t.calories.kcal(),
            pfc: t.pfc.into(),
        }
    }
}
