use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;

#[derive(Clone)]
pub struct OrderAreaService {
    pool: DbPool,
}

impl OrderAreaService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, business_id: i64) -> AppResult<Vec<OrderArea>> {
        let areas = sqlx::query_as::<_, OrderArea>(
            r#"
            SELECT id, business_id, name, description, created_at
            FROM order_areas
            WHERE business_id = ?
            ORDER BY name
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(areas)
    }

    pub async fn create(
        &self,
        business_id: i64,
        request: CreateOrderAreaRequest,
    ) -> AppResult<OrderArea> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Area name is required".to_string()));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO order_areas (business_id, name, description, created_at)
            VALUES (?, ?, ?, NOW())
            "#,
        )
        .bind(business_id)
        .bind(request.name.trim())
        .bind(&request.description)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;

        sqlx::query_as::<_, OrderArea>(
            r#"
            SELECT id, business_id, name, description, created_at
            FROM order_areas
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(&self, business_id: i64, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM order_areas WHERE id = ? AND business_id = ?")
            .bind(id)
            .bind(business_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Order area {id} not found")));
        }
        Ok(())
    }
}
