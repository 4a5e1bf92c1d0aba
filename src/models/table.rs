use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::pos::TableStatus;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTableRequest {
    /// Client-supplied id keeps floor-plan editors stable; generated when
    /// absent.
    pub id: Option<String>,
    #[schema(example = "Mesa 1")]
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[schema(example = "rect")]
    pub shape: String,
    pub seats: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateTableStatusRequest {
    pub status: TableStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemInput {
    pub product_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddOrderItemsRequest {
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PrintAreasRequest {
    pub areas: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddParticipantRequest {
    #[schema(example = "Ana")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssignItemRequest {
    pub item_id: String,
    pub participant_ids: Vec<String>,
}
