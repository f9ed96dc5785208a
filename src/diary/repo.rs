use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::catalog::CatalogRef;
use crate::nutrients::MacroSet;

/// The four fixed meal buckets. Unknown values are rejected when a request
/// is deserialized, so nothing unrecognized can reach the aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "meal_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// One logged food-consumption event. `name` and the four macro fields are
/// snapshots taken at write time; the referenced catalog item may change
/// or be deleted afterwards without affecting history.
#[derive(Debug, Clone, FromRow)]
pub struct Weighing {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Option<Uuid>,
    pub user_product_id: Option<Uuid>,
    pub name: String,
    pub grams: f64,
    pub meal: MealType,
    pub kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub entry_date: Date,
    pub created_at: OffsetDateTime,
}

impl Weighing {
    pub fn catalog_ref(&self) -> CatalogRef {
        CatalogRef::from_columns(self.product_id, self.user_product_id)
    }

    pub fn macros(&self) -> MacroSet {
        MacroSet {
            kcal: self.kcal,
            protein: self.protein_g,
            carbs: self.carbs_g,
            fat: self.fat_g,
        }
    }
}

const WEIGHING_COLUMNS: &str = "id, user_id, product_id, user_product_id, name, grams, meal, \
     kcal, protein_g, carbs_g, fat_g, entry_date, created_at";

#[allow(clippy::too_many_arguments)]
pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    cat_ref: CatalogRef,
    name: &str,
    grams: f64,
    meal: MealType,
    macros: MacroSet,
    entry_date: Date,
) -> sqlx::Result<Weighing> {
    let (product_id, user_product_id) = cat_ref.into_columns();
    let row = sqlx::query_as::<_, Weighing>(&format!(
        r#"
        INSERT INTO weighings (user_id, product_id, user_product_id, name, grams, meal,
                               kcal, protein_g, carbs_g, fat_g, entry_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {WEIGHING_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(product_id)
    .bind(user_product_id)
    .bind(name)
    .bind(grams)
    .bind(meal)
    .bind(macros.kcal)
    .bind(macros.protein)
    .bind(macros.carbs)
    .bind(macros.fat)
    .bind(entry_date)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> sqlx::Result<Option<Weighing>> {
    let row = sqlx::query_as::<_, Weighing>(&format!(
        "SELECT {WEIGHING_COLUMNS} FROM weighings WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    grams: f64,
    meal: MealType,
    macros: MacroSet,
) -> sqlx::Result<Option<Weighing>> {
    let row = sqlx::query_as::<_, Weighing>(&format!(
        r#"
        UPDATE weighings
        SET grams = $3, meal = $4, kcal = $5, protein_g = $6, carbs_g = $7, fat_g = $8
        WHERE id = $1 AND user_id = $2
        RETURNING {WEIGHING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(user_id)
    .bind(grams)
    .bind(meal)
    .bind(macros.kcal)
    .bind(macros.protein)
    .bind(macros.carbs)
    .bind(macros.fat)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> sqlx::Result<bool> {
    let res = sqlx::query("DELETE FROM weighings WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn list_for_date(db: &PgPool, user_id: Uuid, date: Date) -> sqlx::Result<Vec<Weighing>> {
    let rows = sqlx::query_as::<_, Weighing>(&format!(
        r#"
        SELECT {WEIGHING_COLUMNS}
        FROM weighings
        WHERE user_id = $1 AND entry_date = $2
        ORDER BY created_at ASC
        "#
    ))
    .bind(user_id)
    .bind(date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Inclusive date range, one query for a whole charting window.
pub async fn list_in_range(
    db: &PgPool,
    user_id: Uuid,
    first: Date,
    last: Date,
) -> sqlx::Result<Vec<Weighing>> {
    let rows = sqlx::query_as::<_, Weighing>(&format!(
        r#"
        SELECT {WEIGHING_COLUMNS}
        FROM weighings
        WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
        ORDER BY entry_date ASC, created_at ASC
        "#
    ))
    .bind(user_id)
    .bind(first)
    .bind(last)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
