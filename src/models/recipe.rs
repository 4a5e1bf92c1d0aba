use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Recipe {
    pub id: i64,
    pub business_id: i64,
    pub product_id: Option<i64>,
    pub name: String,
    pub instructions: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Ingredient joined with its variation's purchase price for costing.
#[derive(Debug, Clone, FromRow)]
pub struct CostedIngredientRow {
    pub id: i64,
    pub variation_id: i64,
    pub ingredient_name: String,
    pub quantity: f64,
    pub purchase_price_exc_tax: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngredientInput {
    pub variation_id: i64,
    pub quantity: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub product_id: Option<i64>,
    pub instructions: Option<String>,
    pub ingredients: Vec<IngredientInput>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub instructions: Option<String>,
    /// When present, replaces the full ingredient list.
    pub ingredients: Option<Vec<IngredientInput>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngredientResponse {
    pub id: i64,
    pub variation_id: i64,
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub cost: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i64,
    pub product_id: Option<i64>,
    pub name: String,
    pub instructions: Option<String>,
    pub ingredients: Vec<IngredientResponse>,
    /// Sum of ingredient costs (purchase price x quantity).
    pub total_cost: f64,
}
