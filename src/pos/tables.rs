use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::split::SplitState;
use super::tax::round2;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
    NeedsCleaning,
}

/// One line on a table's running order. `item_id` is generated server-side
/// so split-bill assignment can reference a single physical item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub item_id: String,
    pub product_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TableOrder {
    pub items: Vec<OrderItem>,
    pub total: f64,
    /// Order areas (kitchen, bar, ...) this order has already been sent to.
    #[schema(value_type = Vec<String>)]
    pub printed_areas: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitState>,
}

impl TableOrder {
    fn recompute_total(&mut self) {
        self.total = round2(self.items.iter().map(|i| i.unit_price * i.quantity).sum());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Table {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub shape: String,
    pub seats: i32,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<TableOrder>,
}

/// The floor plan of one tenant: tables plus their live orders and split
/// state. Held in process memory behind the service's shared lock.
#[derive(Debug, Default)]
pub struct Floor {
    tables: HashMap<String, Table>,
}

impl Floor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_table(&mut self, table: Table) {
        self.tables.insert(table.id.clone(), table);
    }

    pub fn remove_table(&mut self, table_id: &str) -> AppResult<()> {
        self.tables
            .remove(table_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Table {table_id} not found")))
    }

    pub fn list_tables(&self) -> Vec<&Table> {
        let mut tables: Vec<&Table> = self.tables.values().collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        tables
    }

    pub fn get_table(&self, table_id: &str) -> AppResult<&Table> {
        self.tables
            .get(table_id)
            .ok_or_else(|| AppError::NotFound(format!("Table {table_id} not found")))
    }

    fn table_mut(&mut self, table_id: &str) -> AppResult<&mut Table> {
        self.tables
            .get_mut(table_id)
            .ok_or_else(|| AppError::NotFound(format!("Table {table_id} not found")))
    }

    pub fn set_status(&mut self, table_id: &str, status: TableStatus) -> AppResult<()> {
        self.table_mut(table_id)?.status = status;
        Ok(())
    }

    /// Adds items to a table's order, seating the table first if it was
    /// free. Item ids are generated here.
    pub fn add_items(
        &mut self,
        table_id: &str,
        items: Vec<(i64, String, f64, f64)>,
    ) -> AppResult<&TableOrder> {
        let table = self.table_mut(table_id)?;
        table.status = TableStatus::Occupied;
        let order = table.order.get_or_insert_with(TableOrder::default);
        for (product_id, name, unit_price, quantity) in items {
            order.items.push(OrderItem {
                item_id: Uuid::new_v4().to_string(),
                product_id,
                name,
                unit_price,
                quantity,
            });
        }
        order.recompute_total();
        Ok(order)
    }

    /// Records that the order was sent to the given areas. The set only
    /// grows; re-printing an area is idempotent.
    pub fn mark_printed(&mut self, table_id: &str, areas: Vec<String>) -> AppResult<()> {
        let order = self.active_order_mut(table_id)?;
        order.printed_areas.extend(areas);
        Ok(())
    }

    /// Switches the table's order into split mode. One-way within the
    /// order's lifetime; calling it again is a no-op.
    pub fn enable_split(&mut self, table_id: &str) -> AppResult<&mut SplitState> {
        let order = self.active_order_mut(table_id)?;
        Ok(order.split.get_or_insert_with(SplitState::new))
    }

    pub fn split_mut(&mut self, table_id: &str) -> AppResult<&mut SplitState> {
        self.active_order_mut(table_id)?
            .split
            .as_mut()
            .ok_or_else(|| {
                AppError::ValidationError(format!("Table {table_id} is not in split mode"))
            })
    }

    pub fn find_order_item(&self, table_id: &str, item_id: &str) -> AppResult<&OrderItem> {
        let table = self.get_table(table_id)?;
        table
            .order
            .as_ref()
            .and_then(|o| o.items.iter().find(|i| i.item_id == item_id))
            .ok_or_else(|| AppError::NotFound(format!("Order item {item_id} not found")))
    }

    /// Clears the order, dropping any split state, and frees the table.
    pub fn clear_order(&mut self, table_id: &str) -> AppResult<()> {
        let table = self.table_mut(table_id)?;
        table.order = None;
        table.status = TableStatus::Available;
        Ok(())
    }

    fn active_order_mut(&mut self, table_id: &str) -> AppResult<&mut TableOrder> {
        self.table_mut(table_id)?
            .order
            .as_mut()
            .ok_or_else(|| {
                AppError::ValidationError(format!("Table {table_id} has no active order"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(id: &str, name: &str) -> Table {
        Table {
            id: id.to_string(),
            name: name.to_string(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            shape: "rect".to_string(),
            seats: 4,
            status: TableStatus::Available,
            order: None,
        }
    }

    #[test]
    fn test_add_items_seats_table_and_totals() {
        let mut floor = Floor::new();
        floor.upsert_table(table("t1", "Mesa 1"));

        let order = floor
            .add_items(
                "t1",
                vec![
                    (1, "Arepa".to_string(), 4000.0, 2.0),
                    (2, "Jugo".to_string(), 3000.0, 1.0),
                ],
            )
            .unwrap();

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total, 11000.0);
        assert_eq!(floor.get_table("t1").unwrap().status, TableStatus::Occupied);
    }

    #[test]
    fn test_printed_areas_accumulate_as_set() {
        let mut floor = Floor::new();
        floor.upsert_table(table("t1", "Mesa 1"));
        floor
            .add_items("t1", vec![(1, "Arepa".to_string(), 4000.0, 1.0)])
            .unwrap();

        floor
            .mark_printed("t1", vec!["kitchen".to_string(), "bar".to_string()])
            .unwrap();
        floor.mark_printed("t1", vec!["kitchen".to_string()]).unwrap();

        let order = floor.get_table("t1").unwrap().order.as_ref().unwrap();
        assert_eq!(order.printed_areas.len(), 2);
    }

    #[test]
    fn test_split_requires_active_order() {
        let mut floor = Floor::new();
        floor.upsert_table(table("t1", "Mesa 1"));
        assert!(floor.enable_split("t1").is_err());
    }

    #[test]
    fn test_enable_split_is_idempotent() {
        let mut floor = Floor::new();
        floor.upsert_table(table("t1", "Mesa 1"));
        floor
            .add_items("t1", vec![(1, "Arepa".to_string(), 4000.0, 1.0)])
            .unwrap();

        floor.enable_split("t1").unwrap().add_participant("Ana");
        // A second enable must not wipe the existing bills.
        assert_eq!(floor.enable_split("t1").unwrap().bills.len(), 1);
    }

    #[test]
    fn test_clear_order_drops_split_and_frees_table() {
        let mut floor = Floor::new();
        floor.upsert_table(table("t1", "Mesa 1"));
        floor
            .add_items("t1", vec![(1, "Arepa".to_string(), 4000.0, 1.0)])
            .unwrap();
        floor.enable_split("t1").unwrap();

        floor.clear_order("t1").unwrap();

        let t = floor.get_table("t1").unwrap();
        assert_eq!(t.status, TableStatus::Available);
        assert!(t.order.is_none());
        assert!(floor.split_mut("t1").is_err());
    }

    #[test]
    fn test_list_tables_sorted_by_name() {
        let mut floor = Floor::new();
        floor.upsert_table(table("b", "Mesa 2"));
        floor.upsert_table(table("a", "Mesa 1"));
        let names: Vec<&str> = floor.list_tables().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Mesa 1", "Mesa 2"]);
    }
}
