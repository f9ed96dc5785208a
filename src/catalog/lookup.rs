use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::LookupConfig;
use crate::nutrients::Per100g;

/// A food resolved from the remote database.
#[derive(Debug, Clone)]
pub struct RemoteFood {
    pub name: String,
    pub brand: Option<String>,
    pub per_100g: Per100g,
}

/// Third-party barcode resolution. A miss is `Ok(None)`; `Err` means the
/// remote was unreachable or answered garbage, which is a different thing
/// for callers.
#[async_trait]
pub trait FoodLookup: Send + Sync {
    async fn by_barcode(&self, barcode: &str) -> anyhow::Result<Option<RemoteFood>>;
}

/// Open Food Facts client. Requests carry a hard timeout so a slow remote
/// degrades to "not found" latency, never an indefinite hang.
pub struct OpenFoodFacts {
    http: reqwest::Client,
    base_url: String,
}

impl OpenFoodFacts {
    pub fn new(cfg: &LookupConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OffResponse {
    status: u8,
    product: Option<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct OffProduct {
    product_name: Option<String>,
    brands: Option<String>,
    #[serde(default)]
    nutriments: OffNutriments,
}

#[derive(Debug, Default, Deserialize)]
struct OffNutriments {
    #[serde(rename = "energy-kcal_100g")]
    energy_kcal_100g: Option<f64>,
    proteins_100g: Option<f64>,
    carbohydrates_100g: Option<f64>,
    fat_100g: Option<f64>,
    fiber_100g: Option<f64>,
    salt_100g: Option<f64>,
}

impl OffProduct {
    fn into_remote_food(self) -> Option<RemoteFood> {
        let name = self.product_name.filter(|n| !n.trim().is_empty())?;
        // Without per-100g energy the entry is useless for logging.
        let kcal = self.nutriments.energy_kcal_100g?;
        Some(RemoteFood {
            name,
            brand: self.brands.filter(|b| !b.trim().is_empty()),
            per_100g: Per100g {
                kcal,
                protein: self.nutriments.proteins_100g.unwrap_or(0.0),
                carbs: self.nutriments.carbohydrates_100g.unwrap_or(0.0),
                fat: self.nutriments.fat_100g.unwrap_or(0.0),
                fiber: self.nutriments.fiber_100g,
                salt: self.nutriments.salt_100g,
            },
        })
    }
}

#[async_trait]
impl FoodLookup for OpenFoodFacts {
    async fn by_barcode(&self, barcode: &str) -> anyhow::Result<Option<RemoteFood>> {
        let url = format!("{}/api/v0/product/{}.json", self.base_url, barcode);
        let resp = self.http.get(&url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body: OffResponse = resp.error_for_status()?.json().await?;
        if body.status != 1 {
            return Ok(None);
        }
        Ok(body.product.and_then(OffProduct::into_remote_food))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_found_product() {
        let raw = r#"{
            "status": 1,
            "product": {
                "product_name": "Oat flakes",
                "brands": "Acme",
                "nutriments": {
                    "energy-kcal_100g": 372.0,
                    "proteins_100g": 13.5,
                    "carbohydrates_100g": 58.7,
                    "fat_100g": 7.0,
                    "fiber_100g": 10.0,
                    "salt_100g": 0.02
                }
            }
        }"#;
        let resp: OffResponse = serde_json::from_str(raw).unwrap();
        let food = resp.product.unwrap().into_remote_food().unwrap();
        assert_eq!(food.name, "Oat flakes");
        assert_eq!(food.brand.as_deref(), Some("Acme"));
        assert_eq!(food.per_100g.kcal, 372.0);
        assert_eq!(food.per_100g.fiber, Some(10.0));
    }

    #[test]
    fn miss_and_nameless_products_are_none() {
        let miss: OffResponse = serde_json::from_str(r#"{"status": 0}"#).unwrap();
        assert_eq!(miss.status, 0);
        assert!(miss.product.is_none());

        let nameless: OffResponse = serde_json::from_str(
            r#"{"status": 1, "product": {"nutriments": {"energy-kcal_100g": 100.0}}}"#,
        )
        .unwrap();
        assert!(nameless.product.unwrap().into_remote_food().is_none());
    }
}
