use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use super::calculator::{ActivityLevel, Sex, Targets};
use super::repo::Profile;

#[derive(Debug, Deserialize)]
pub struct ProfileInput {
    pub sex: Sex,
    pub birth_date: Date,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub activity: ActivityLevel,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub sex: Sex,
    pub birth_date: Date,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: ActivityLevel,
    pub targets: Targets,
    pub updated_at: OffsetDateTime,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        let targets = p.targets();
        Self {
            sex: p.sex,
            birth_date: p.birth_date,
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            activity: p.activity,
            targets,
            updated_at: p.updated_at,
        }
    }
}

/// Targets computed from a candidate profile, without persisting anything.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub targets: Targets,
}
