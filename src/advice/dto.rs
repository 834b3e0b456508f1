use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::domain::AdviceCache;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Deserialize)]
pub struct AdviceQuery {
    /// Local day to advise on; today when absent.
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub advice: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<AdviceCache> for AdviceResponse {
    fn from(cache: AdviceCache) -> Self {
        Self {
            date: cache.date(),
            advice: cache.advice().to_owned(),
            created_at: cache.created_at(),
        }
    }
}
