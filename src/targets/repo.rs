use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::calculator::{ActivityLevel, Sex, Targets};

/// One biometric profile per user, with the derived targets persisted
/// alongside the inputs they were computed from.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub sex: Sex,
    pub birth_date: Date,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: ActivityLevel,
    pub target_kcal: i32,
    pub target_protein_g: i32,
    pub target_carbs_g: i32,
    pub target_fat_g: i32,
    pub water_goal_ml: i32,
    pub updated_at: OffsetDateTime,
}

impl Profile {
    pub fn targets(&self) -> Targets {
        Targets {
            kcal: self.target_kcal,
            protein: self.target_protein_g,
            carbs: self.target_carbs_g,
            fat: self.target_fat_g,
            water_ml: self.water_goal_ml,
        }
    }
}

const PROFILE_COLUMNS: &str = "user_id, sex, birth_date, height_cm, weight_kg, activity, \
     target_kcal, target_protein_g, target_carbs_g, target_fat_g, water_goal_ml, updated_at";

pub async fn get(db: &PgPool, user_id: Uuid) -> sqlx::Result<Option<Profile>> {
    let row = sqlx::query_as::<_, Profile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Stored targets, or `None` when the user never filled a profile.
pub async fn get_targets(db: &PgPool, user_id: Uuid) -> sqlx::Result<Option<Targets>> {
    let row = sqlx::query_as::<_, (i32, i32, i32, i32, i32)>(
        r#"
        SELECT target_kcal, target_protein_g, target_carbs_g, target_fat_g, water_goal_ml
        FROM profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row.map(|(kcal, protein, carbs, fat, water_ml)| Targets {
        kcal,
        protein,
        carbs,
        fat,
        water_ml,
    }))
}

#[allow(clippy::too_many_arguments)]
pub async fn upsert(
    db: &PgPool,
    user_id: Uuid,
    sex: Sex,
    birth_date: Date,
    height_cm: f64,
    weight_kg: f64,
    activity: ActivityLevel,
    targets: Targets,
) -> sqlx::Result<Profile> {
    let row = sqlx::query_as::<_, Profile>(&format!(
        r#"
        INSERT INTO profiles (user_id, sex, birth_date, height_cm, weight_kg, activity,
                              target_kcal, target_protein_g, target_carbs_g, target_fat_g,
                              water_goal_ml, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now())
        ON CONFLICT (user_id) DO UPDATE SET
            sex = EXCLUDED.sex,
            birth_date = EXCLUDED.birth_date,
            height_cm = EXCLUDED.height_cm,
            weight_kg = EXCLUDED.weight_kg,
            activity = EXCLUDED.activity,
            target_kcal = EXCLUDED.target_kcal,
            target_protein_g = EXCLUDED.target_protein_g,
            target_carbs_g = EXCLUDED.target_carbs_g,
            target_fat_g = EXCLUDED.target_fat_g,
            water_goal_ml = EXCLUDED.water_goal_ml,
            updated_at = now()
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(sex)
    .bind(birth_date)
    .bind(height_cm)
    .bind(weight_kg)
    .bind(activity)
    .bind(targets.kcal)
    .bind(targets.protein)
    .bind(targets.carbs)
    .bind(targets.fat)
    .bind(targets.water_ml)
    .fetch_one(db)
    .await?;
    Ok(row)
}
