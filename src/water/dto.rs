use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::diary::summary::RangeWindow;

use super::repo::WaterLog;

/// Quick-add defaults to one 250 ml glass.
pub const DEFAULT_GLASS_ML: i32 = 250;

#[derive(Debug, Deserialize)]
pub struct AddWater {
    #[serde(default)]
    pub ml: Option<i32>,
    #[serde(default)]
    pub date: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct WaterLogResponse {
    pub id: Uuid,
    pub ml: i32,
    pub date: Date,
    pub created_at: OffsetDateTime,
}

impl From<WaterLog> for WaterLogResponse {
    fn from(w: WaterLog) -> Self {
        Self {
            id: w.id,
            ml: w.volume_ml,
            date: w.entry_date,
            created_at: w.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    #[serde(default)]
    pub date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub window: RangeWindow,
}

#[derive(Debug, Serialize)]
pub struct WaterDayResponse {
    pub date: Date,
    pub total_ml: i64,
    pub glasses: i64,
    pub goal_ml: i32,
}
