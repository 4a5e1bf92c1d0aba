use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: f64,
    /// Tax-inclusive unit price as shown to the client.
    pub unit_price_inc_tax: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub location_id: i64,
    pub contact_id: Option<i64>,
    pub items: Vec<CheckoutItem>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReplaceItemsRequest {
    pub items: Vec<CheckoutItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: i64,
    pub business_id: i64,
    pub location_id: i64,
    pub contact_id: Option<i64>,
    pub invoice_no: String,
    pub status: String,
    pub payment_status: String,
    pub final_total: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TransactionLine {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    pub variation_id: Option<i64>,
    pub quantity: f64,
    /// Tax-exclusive unit price.
    pub unit_price: f64,
    pub unit_price_inc_tax: f64,
    pub tax_amount: f64,
    pub combo_group_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i64,
    pub location_id: i64,
    pub contact_id: Option<i64>,
    pub invoice_no: String,
    pub status: String,
    pub payment_status: String,
    pub final_total: f64,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<TransactionLine>>,
}

impl TransactionResponse {
    pub fn from_row(t: Transaction, lines: Option<Vec<TransactionLine>>) -> Self {
        Self {
            id: t.id,
            location_id: t.location_id,
            contact_id: t.contact_id,
            invoice_no: t.invoice_no,
            status: t.status,
            payment_status: t.payment_status,
            final_total: t.final_total,
            created_at: t.created_at,
            lines,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
