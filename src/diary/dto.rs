use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::catalog::CatalogRef;
use crate::nutrients::Per100g;

use super::repo::{MealType, Weighing};
use super::summary::RangeWindow;

/// Where the nutrition values of a new weighing come from: a shared
/// product, one of the caller's private products, or values typed in by
/// hand.
#[derive(Debug, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum WeighingSource {
    Product { id: Uuid },
    UserProduct { id: Uuid },
    Manual { name: String, per_100g: Per100g },
}

#[derive(Debug, Deserialize)]
pub struct CreateWeighing {
    pub meal: MealType,
    pub grams: f64,
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(flatten)]
    pub source: WeighingSource,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWeighing {
    #[serde(default)]
    pub grams: Option<f64>,
    #[serde(default)]
    pub meal: Option<MealType>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogRefDto {
    Product { id: Uuid },
    UserProduct { id: Uuid },
    Manual,
}

impl From<CatalogRef> for CatalogRefDto {
    fn from(r: CatalogRef) -> Self {
        match r {
            CatalogRef::Global(id) => CatalogRefDto::Product { id },
            CatalogRef::Private(id) => CatalogRefDto::UserProduct { id },
            CatalogRef::None => CatalogRefDto::Manual,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WeighingResponse {
    pub id: Uuid,
    pub name: String,
    pub grams: f64,
    pub meal: MealType,
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub date: Date,
    pub catalog_ref: CatalogRefDto,
    pub created_at: OffsetDateTime,
}

impl From<Weighing> for WeighingResponse {
    fn from(w: Weighing) -> Self {
        let catalog_ref = w.catalog_ref().into();
        Self {
            id: w.id,
            name: w.name,
            grams: w.grams,
            meal: w.meal,
            kcal: w.kcal,
            protein: w.protein_g,
            carbs: w.carbs_g,
            fat: w.fat_g,
            date: w.entry_date,
            catalog_ref,
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
