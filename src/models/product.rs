use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::pos::parse_combo_field;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub business_id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub category: Option<String>,
    /// Component product ids when this product is a combo. Normalized to a
    /// JSON array on write; legacy rows may hold looser formats.
    pub combo: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The priced instance of a product. Every product has at least one
/// variation; pricing lookups use the first.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Variation {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub sell_price_inc_tax: f64,
    pub purchase_price_exc_tax: f64,
    pub tax_percent: Option<f64>,
}

/// Product joined with its primary variation, as handed to pricing code.
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithVariation {
    pub id: i64,
    pub name: String,
    pub combo: Option<String>,
    pub variation_id: Option<i64>,
    pub sell_price_inc_tax: Option<f64>,
    pub tax_percent: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub is_combo: bool,
    pub combo_product_ids: Vec<i64>,
    pub sell_price_inc_tax: f64,
    pub purchase_price_exc_tax: f64,
    pub tax_percent: Option<f64>,
}

impl ProductResponse {
    pub fn from_parts(product: Product, variation: Option<Variation>) -> Self {
        let combo_product_ids =
            parse_combo_field(product.combo.as_deref()).unwrap_or_default();
        Self {
            id: product.id,
            name: product.name,
            sku: product.sku,
            category: product.category,
            is_combo: !combo_product_ids.is_empty(),
            combo_product_ids,
            sell_price_inc_tax: variation.as_ref().map(|v| v.sell_price_inc_tax).unwrap_or(0.0),
            purchase_price_exc_tax: variation
                .as_ref()
                .map(|v| v.purchase_price_exc_tax)
                .unwrap_or(0.0),
            tax_percent: variation.and_then(|v| v.tax_percent),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Bandeja paisa")]
    pub name: String,
    pub sku: Option<String>,
    pub category: Option<String>,
    /// Component ids; a non-empty list makes the product a combo.
    pub combo_product_ids: Option<Vec<i64>>,
    pub sell_price_inc_tax: f64,
    pub purchase_price_exc_tax: Option<f64>,
    pub tax_percent: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub combo_product_ids: Option<Vec<i64>>,
    pub sell_price_inc_tax: Option<f64>,
    pub purchase_price_exc_tax: Option<f64>,
    pub tax_percent: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category: Option<String>,
}
