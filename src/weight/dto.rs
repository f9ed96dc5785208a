use serde::{Deserialize, Serialize};
use time::Date;

use super::repo::WeightLog;

#[derive(Debug, Deserialize)]
pub struct LogWeight {
    pub kg: f64,
    #[serde(default)]
    pub date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    90
}

#[derive(Debug, Serialize)]
pub struct WeightEntry {
    pub kg: f64,
    pub date: Date,
}

impl From<WeightLog> for WeightEntry {
    fn from(w: WeightLog) -> Self {
        Self {
            kg: w.weight_kg,
            date: w.entry_date,
        }
    }
}
