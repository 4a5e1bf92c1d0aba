use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::*;
use crate::pos::{Bill, Floor, Table, TableOrder, TableStatus};

/// Server-authoritative table and split-bill state.
///
/// One `Floor` per tenant, held behind a shared lock. Tables, their live
/// orders and split bills never cross tenant boundaries: every method is
/// keyed by the caller's business id.
#[derive(Clone, Default)]
pub struct TableService {
    floors: Arc<RwLock<HashMap<i64, Floor>>>,
}

impl TableService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list_tables(&self, business_id: i64) -> Vec<Table> {
        let floors = self.floors.read().await;
        floors
            .get(&business_id)
            .map(|f| f.list_tables().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn upsert_table(&self, business_id: i64, request: CreateTableRequest) -> Table {
        let table = Table {
            id: request.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: request.name,
            x: request.x,
            y: request.y,
            width: request.width,
            height: request.height,
            shape: request.shape,
            seats: request.seats,
            status: TableStatus::Available,
            order: None,
        };

        let mut floors = self.floors.write().await;
        floors
            .entry(business_id)
            .or_default()
            .upsert_table(table.clone());
        table
    }

    pub async fn remove_table(&self, business_id: i64, table_id: &str) -> AppResult<()> {
        let mut floors = self.floors.write().await;
        floor_mut(&mut floors, business_id).remove_table(table_id)
    }

    pub async fn set_status(
        &self,
        business_id: i64,
        table_id: &str,
        status: TableStatus,
    ) -> AppResult<()> {
        let mut floors = self.floors.write().await;
        floor_mut(&mut floors, business_id).set_status(table_id, status)
    }

    pub async fn add_items(
        &self,
        business_id: i64,
        table_id: &str,
        request: AddOrderItemsRequest,
    ) -> AppResult<TableOrder> {
        let items = request
            .items
            .into_iter()
            .map(|i| (i.product_id, i.name, i.unit_price, i.quantity))
            .collect();

        let mut floors = self.floors.write().await;
        floor_mut(&mut floors, business_id)
            .add_items(table_id, items)
            .cloned()
    }

    pub async fn mark_printed(
        &self,
        business_id: i64,
        table_id: &str,
        areas: Vec<String>,
    ) -> AppResult<()> {
        let mut floors = self.floors.write().await;
        floor_mut(&mut floors, business_id).mark_printed(table_id, areas)
    }

    pub async fn clear_order(&self, business_id: i64, table_id: &str) -> AppResult<()> {
        let mut floors = self.floors.write().await;
        floor_mut(&mut floors, business_id).clear_order(table_id)
    }

    pub async fn enable_split(&self, business_id: i64, table_id: &str) -> AppResult<Vec<Bill>> {
        let mut floors = self.floors.write().await;
        let split = floor_mut(&mut floors, business_id).enable_split(table_id)?;
        Ok(split.bills.clone())
    }

    pub async fn add_participant(
        &self,
        business_id: i64,
        table_id: &str,
        name: &str,
    ) -> AppResult<Vec<Bill>> {
        let mut floors = self.floors.write().await;
        let split = floor_mut(&mut floors, business_id).split_mut(table_id)?;
        split.add_participant(name);
        Ok(split.bills.clone())
    }

    pub async fn remove_participant(
        &self,
        business_id: i64,
        table_id: &str,
        bill_id: &str,
    ) -> AppResult<Vec<Bill>> {
        let mut floors = self.floors.write().await;
        let split = floor_mut(&mut floors, business_id).split_mut(table_id)?;
        split.remove_participant(bill_id)?;
        Ok(split.bills.clone())
    }

    /// Assigns one order item to the named participants, exclusive for one
    /// id, evenly prorated for several.
    pub async fn assign_item(
        &self,
        business_id: i64,
        table_id: &str,
        request: AssignItemRequest,
    ) -> AppResult<Vec<Bill>> {
        let mut floors = self.floors.write().await;
        let floor = floor_mut(&mut floors, business_id);

        let item = floor.find_order_item(table_id, &request.item_id)?.clone();

        let split = floor.split_mut(table_id)?;
        split.assign_item(
            &item.item_id,
            &item.name,
            item.unit_price,
            item.quantity,
            &request.participant_ids,
        )?;
        Ok(split.bills.clone())
    }

    pub async fn mark_bill_paid(
        &self,
        business_id: i64,
        table_id: &str,
        bill_id: &str,
    ) -> AppResult<Vec<Bill>> {
        let mut floors = self.floors.write().await;
        let split = floor_mut(&mut floors, business_id).split_mut(table_id)?;
        split.mark_paid(bill_id)?;
        Ok(split.bills.clone())
    }

    /// Snapshot of the current bills, as-is; allocation completeness is
    /// not verified.
    pub async fn finalize_split(&self, business_id: i64, table_id: &str) -> AppResult<Vec<Bill>> {
        let mut floors = self.floors.write().await;
        let split = floor_mut(&mut floors, business_id).split_mut(table_id)?;
        Ok(split.finalize().to_vec())
    }
}

fn floor_mut(floors: &mut HashMap<i64, Floor>, business_id: i64) -> &mut Floor {
    floors.entry(business_id).or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_request(name: &str) -> CreateTableRequest {
        CreateTableRequest {
            id: None,
            name: name.to_string(),
            x: 0.0,
            y: 0.0,
            width: 80.0,
            height: 80.0,
            shape: "rect".to_string(),
            seats: 4,
        }
    }

    fn items_request() -> AddOrderItemsRequest {
        AddOrderItemsRequest {
            items: vec![OrderItemInput {
                product_id: 1,
                name: "Bandeja".to_string(),
                unit_price: 25000.0,
                quantity: 1.0,
            }],
        }
    }

    #[tokio::test]
    async fn test_tenants_are_isolated() {
        let service = TableService::new();
        service.upsert_table(1, table_request("Mesa 1")).await;

        assert_eq!(service.list_tables(1).await.len(), 1);
        assert!(service.list_tables(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_split_flow_over_service() {
        let service = TableService::new();
        let table = service.upsert_table(1, table_request("Mesa 1")).await;

        let order = service.add_items(1, &table.id, items_request()).await.unwrap();
        let item_id = order.items[0].item_id.clone();

        service.enable_split(1, &table.id).await.unwrap();
        let bills = service.add_participant(1, &table.id, "Ana").await.unwrap();
        let ana = bills[0].id.clone();
        let bills = service.add_participant(1, &table.id, "Luis").await.unwrap();
        let luis = bills[1].id.clone();

        let bills = service
            .assign_item(
                1,
                &table.id,
                AssignItemRequest {
                    item_id,
                    participant_ids: vec![ana.clone(), luis.clone()],
                },
            )
            .await
            .unwrap();

        for bill in &bills {
            assert_eq!(bill.subtotal, 12500.0);
            assert_eq!(bill.total, 13750.0);
        }

        let bills = service.mark_bill_paid(1, &table.id, &ana).await.unwrap();
        assert!(bills.iter().find(|b| b.id == ana).unwrap().is_paid);

        service.clear_order(1, &table.id).await.unwrap();
        assert!(service.finalize_split(1, &table.id).await.is_err());
    }
}
