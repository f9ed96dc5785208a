use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::nutrients::Per100g;

/// Which catalog a weighing references, if any. Manual entries carry no
/// reference at all; the snapshot on the weighing row is self-sufficient
/// either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogRef {
    Global(Uuid),
    Private(Uuid),
    None,
}

impl CatalogRef {
    pub fn from_columns(product_id: Option<Uuid>, user_product_id: Option<Uuid>) -> Self {
        match (product_id, user_product_id) {
            (Some(id), _) => CatalogRef::Global(id),
            (None, Some(id)) => CatalogRef::Private(id),
            (None, None) => CatalogRef::None,
        }
    }

    pub fn into_columns(self) -> (Option<Uuid>, Option<Uuid>) {
        match self {
            CatalogRef::Global(id) => (Some(id), None),
            CatalogRef::Private(id) => (None, Some(id)),
            CatalogRef::None => (None, None),
        }
    }
}

/// Shared read-only catalog row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub kcal_100g: f64,
    pub protein_100g: f64,
    pub carbs_100g: f64,
    pub fat_100g: f64,
    pub fiber_100g: Option<f64>,
    pub salt_100g: Option<f64>,
    pub source: String,
}

/// Per-user private catalog row; same nutrition shape, owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProduct {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub kcal_100g: f64,
    pub protein_100g: f64,
    pub carbs_100g: f64,
    pub fat_100g: f64,
    pub fiber_100g: Option<f64>,
    pub salt_100g: Option<f64>,
}

impl Product {
    pub fn per_100g(&self) -> Per100g {
        Per100g {
            kcal: self.kcal_100g,
            protein: self.protein_100g,
            carbs: self.carbs_100g,
            fat: self.fat_100g,
            fiber: self.fiber_100g,
            salt: self.salt_100g,
        }
    }
}

impl UserProduct {
    pub fn per_100g(&self) -> Per100g {
        Per100g {
            kcal: self.kcal_100g,
            protein: self.protein_100g,
            carbs: self.carbs_100g,
            fat: self.fat_100g,
            fiber: self.fiber_100g,
            salt: self.salt_100g,
        }
    }
}

pub async fn search_global(db: &PgPool, q: &str, limit: i64) -> sqlx::Result<Vec<Product>> {
    let rows = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, brand, barcode, kcal_100g, protein_100g, carbs_100g,
               fat_100g, fiber_100g, salt_100g, source
        FROM products
        WHERE name ILIKE '%' || $1 || '%'
        ORDER BY name ASC
        LIMIT $2
        "#,
    )
    .bind(q)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn search_private(
    db: &PgPool,
    user_id: Uuid,
    q: &str,
    limit: i64,
) -> sqlx::Result<Vec<UserProduct>> {
    let rows = sqlx::query_as::<_, UserProduct>(
        r#"
        SELECT id, user_id, name, brand, barcode, kcal_100g, protein_100g,
               carbs_100g, fat_100g, fiber_100g, salt_100g
        FROM user_products
        WHERE user_id = $1 AND name ILIKE '%' || $2 || '%'
        ORDER BY name ASC
        LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(q)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn global_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, brand, barcode, kcal_100g, protein_100g, carbs_100g,
               fat_100g, fiber_100g, salt_100g, source
        FROM products
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn private_by_id(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> sqlx::Result<Option<UserProduct>> {
    let row = sqlx::query_as::<_, UserProduct>(
        r#"
        SELECT id, user_id, name, brand, barcode, kcal_100g, protein_100g,
               carbs_100g, fat_100g, fiber_100g, salt_100g
        FROM user_products
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn global_by_barcode(db: &PgPool, barcode: &str) -> sqlx::Result<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, brand, barcode, kcal_100g, protein_100g, carbs_100g,
               fat_100g, fiber_100g, salt_100g, source
        FROM products
        WHERE barcode = $1
        "#,
    )
    .bind(barcode)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn private_by_barcode(
    db: &PgPool,
    user_id: Uuid,
    barcode: &str,
) -> sqlx::Result<Option<UserProduct>> {
    let row = sqlx::query_as::<_, UserProduct>(
        r#"
        SELECT id, user_id, name, brand, barcode, kcal_100g, protein_100g,
               carbs_100g, fat_100g, fiber_100g, salt_100g
        FROM user_products
        WHERE user_id = $1 AND barcode = $2
        "#,
    )
    .bind(user_id)
    .bind(barcode)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn insert_global(
    db: &PgPool,
    name: &str,
    brand: Option<&str>,
    barcode: Option<&str>,
    per: &Per100g,
    source: &str,
) -> sqlx::Result<Product> {
    let row = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, brand, barcode, kcal_100g, protein_100g,
                              carbs_100g, fat_100g, fiber_100g, salt_100g, source)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (barcode) DO UPDATE SET name = EXCLUDED.name
        RETURNING id, name, brand, barcode, kcal_100g, protein_100g, carbs_100g,
                  fat_100g, fiber_100g, salt_100g, source
        "#,
    )
    .bind(name)
    .bind(brand)
    .bind(barcode)
    .bind(per.kcal)
    .bind(per.protein)
    .bind(per.carbs)
    .bind(per.fat)
    .bind(per.fiber)
    .bind(per.salt)
    .bind(source)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn insert_private(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
    brand: Option<&str>,
    barcode: Option<&str>,
    per: &Per100g,
) -> sqlx::Result<UserProduct> {
    let row = sqlx::query_as::<_, UserProduct>(
        r#"
        INSERT INTO user_products (user_id, name, brand, barcode, kcal_100g,
                                   protein_100g, carbs_100g, fat_100g, fiber_100g, salt_100g)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id, user_id, name, brand, barcode, kcal_100g, protein_100g,
                  carbs_100g, fat_100g, fiber_100g, salt_100g
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(brand)
    .bind(barcode)
    .bind(per.kcal)
    .bind(per.protein)
    .bind(per.carbs)
    .bind(per.fat)
    .bind(per.fiber)
    .bind(per.salt)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Resolve a catalog reference to the display name and per-100g values,
/// scoped to the calling user for private items.
pub async fn resolve(
    db: &PgPool,
    user_id: Uuid,
    cat_ref: CatalogRef,
) -> sqlx::Result<Option<(String, Per100g)>> {
    match cat_ref {
        CatalogRef::Global(id) => Ok(global_by_id(db, id)
            .await?
            .map(|p| (p.name.clone(), p.per_100g()))),
        CatalogRef::Private(id) => Ok(private_by_id(db, user_id, id)
            .await?
            .map(|p| (p.name.clone(), p.per_100g()))),
        CatalogRef::None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ref_column_round_trip() {
        let id = Uuid::new_v4();
        assert_eq!(
            CatalogRef::from_columns(Some(id), None),
            CatalogRef::Global(id)
        );
        assert_eq!(
            CatalogRef::from_columns(None, Some(id)),
            CatalogRef::Private(id)
        );
        assert_eq!(CatalogRef::from_columns(None, None), CatalogRef::None);
        assert_eq!(CatalogRef::Private(id).into_columns(), (None, Some(id)));
    }
}
