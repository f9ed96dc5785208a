use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::nutrients::Per100g;

use super::repo::{Product, UserProduct};

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Product,
    UserProduct,
}

#[derive(Debug, Serialize)]
pub struct CatalogItem {
    pub id: Uuid,
    pub kind: CatalogKind,
    pub name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub per_100g: Per100g,
    pub source: Option<String>,
}

impl From<Product> for CatalogItem {
    fn from(p: Product) -> Self {
        let per_100g = p.per_100g();
        Self {
            id: p.id,
            kind: CatalogKind::Product,
            name: p.name,
            brand: p.brand,
            barcode: p.barcode,
            per_100g,
            source: Some(p.source),
        }
    }
}

impl From<UserProduct> for CatalogItem {
    fn from(p: UserProduct) -> Self {
        let per_100g = p.per_100g();
        Self {
            id: p.id,
            kind: CatalogKind::UserProduct,
            name: p.name,
            brand: p.brand,
            barcode: p.barcode,
            per_100g,
            source: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub items: Vec<CatalogItem>,
}

/// Barcode lookup outcome; a miss is a first-class response, not an error.
#[derive(Debug, Serialize)]
pub struct BarcodeResponse {
    pub found: bool,
    pub item: Option<CatalogItem>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserProduct {
    pub name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub per_100g: Per100g,
}
