use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::pos::parse_combo_field;

#[derive(Clone)]
pub struct ProductService {
    pool: DbPool,
}

impl ProductService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        business_id: i64,
        request: CreateProductRequest,
    ) -> AppResult<ProductResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Product name is required".to_string()));
        }
        if request.sell_price_inc_tax < 0.0 {
            return Err(AppError::ValidationError(
                "Sell price must not be negative".to_string(),
            ));
        }

        let combo = normalize_combo(request.combo_product_ids.as_deref())?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (business_id, name, sku, category, combo, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(business_id)
        .bind(request.name.trim())
        .bind(&request.sku)
        .bind(&request.category)
        .bind(&combo)
        .execute(&mut *tx)
        .await?;

        let product_id = result.last_insert_id() as i64;

        // Every product carries at least one variation for pricing lookups.
        sqlx::query(
            r#"
            INSERT INTO variations
                (product_id, name, sell_price_inc_tax, purchase_price_exc_tax, tax_percent)
            VALUES (?, 'Default', ?, ?, ?)
            "#,
        )
        .bind(product_id)
        .bind(request.sell_price_inc_tax)
        .bind(request.purchase_price_exc_tax.unwrap_or(0.0))
        .bind(request.tax_percent)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get(business_id, product_id).await
    }

    pub async fn get(&self, business_id: i64, id: i64) -> AppResult<ProductResponse> {
        let product = self.fetch_product(business_id, id).await?;
        let variation = self.primary_variation(id).await?;
        Ok(ProductResponse::from_parts(product, variation))
    }

    pub async fn list(
        &self,
        business_id: i64,
        query: &ProductQuery,
    ) -> AppResult<PaginatedResponse<ProductResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let offset = params.get_offset();
        let limit = params.get_limit();

        let total: i64 = match &query.category {
            Some(category) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM products WHERE business_id = ? AND category = ?",
                )
                .bind(business_id)
                .bind(category)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE business_id = ?")
                    .bind(business_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        let products = match &query.category {
            Some(category) => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, business_id, name, sku, category, combo, created_at, updated_at
                    FROM products
                    WHERE business_id = ? AND category = ?
                    ORDER BY name
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(business_id)
                .bind(category)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, business_id, name, sku, category, combo, created_at, updated_at
                    FROM products
                    WHERE business_id = ?
                    ORDER BY name
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(business_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut items = Vec::with_capacity(products.len());
        for product in products {
            let variation = self.primary_variation(product.id).await?;
            items.push(ProductResponse::from_parts(product, variation));
        }

        Ok(PaginatedResponse::new(
            items,
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(20),
            total,
        ))
    }

    /// Products whose combo column parses to a non-empty component list.
    pub async fn list_combos(&self, business_id: i64) -> AppResult<Vec<ProductResponse>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, business_id, name, sku, category, combo, created_at, updated_at
            FROM products
            WHERE business_id = ? AND combo IS NOT NULL
            ORDER BY name
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        let mut combos = Vec::new();
        for product in products {
            // The column may hold junk on legacy rows; only rows that
            // survive the defensive parse count as combos.
            if parse_combo_field(product.combo.as_deref()).is_none() {
                continue;
            }
            let variation = self.primary_variation(product.id).await?;
            combos.push(ProductResponse::from_parts(product, variation));
        }
        Ok(combos)
    }

    pub async fn update(
        &self,
        business_id: i64,
        id: i64,
        request: UpdateProductRequest,
    ) -> AppResult<ProductResponse> {
        let product = self.fetch_product(business_id, id).await?;
        let variation = self.primary_variation(id).await?;

        let name = request.name.unwrap_or(product.name);
        let sku = request.sku.or(product.sku);
        let category = request.category.or(product.category);
        let combo = match request.combo_product_ids.as_deref() {
            Some(ids) => normalize_combo(Some(ids))?,
            None => product.combo,
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE products
            SET name = ?, sku = ?, category = ?, combo = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(&name)
        .bind(&sku)
        .bind(&category)
        .bind(&combo)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if let Some(v) = variation {
            let sell = request.sell_price_inc_tax.unwrap_or(v.sell_price_inc_tax);
            let purchase = request
                .purchase_price_exc_tax
                .unwrap_or(v.purchase_price_exc_tax);
            let tax = request.tax_percent.or(v.tax_percent);

            sqlx::query(
                r#"
                UPDATE variations
                SET sell_price_inc_tax = ?, purchase_price_exc_tax = ?, tax_percent = ?
                WHERE id = ?
                "#,
            )
            .bind(sell)
            .bind(purchase)
            .bind(tax)
            .bind(v.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get(business_id, id).await
    }

    pub async fn delete(&self, business_id: i64, id: i64) -> AppResult<()> {
        self.fetch_product(business_id, id).await?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM variations WHERE product_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    async fn fetch_product(&self, business_id: i64, id: i64) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, business_id, name, sku, category, combo, created_at, updated_at
            FROM products
            WHERE id = ? AND business_id = ?
            "#,
        )
        .bind(id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))
    }

    async fn primary_variation(&self, product_id: i64) -> AppResult<Option<Variation>> {
        let variation = sqlx::query_as::<_, Variation>(
            r#"
            SELECT id, product_id, name, sell_price_inc_tax, purchase_price_exc_tax, tax_percent
            FROM variations
            WHERE product_id = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(variation)
    }
}

/// Stores the combo list as a canonical JSON array so new rows never need
/// the defensive read-path parsing. `None`/empty clears the combo flag.
fn normalize_combo(ids: Option<&[i64]>) -> AppResult<Option<String>> {
    match ids {
        Some([]) | None => Ok(None),
        Some(ids) => Ok(Some(serde_json::to_string(ids)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_combo() {
        assert_eq!(normalize_combo(None).unwrap(), None);
        assert_eq!(normalize_combo(Some(&[])).unwrap(), None);
        assert_eq!(
            normalize_combo(Some(&[10, 20])).unwrap(),
            Some("[10,20]".to_string())
        );
    }

    #[test]
    fn test_normalized_combo_round_trips_through_parser() {
        let stored = normalize_combo(Some(&[7, 8, 9])).unwrap();
        assert_eq!(parse_combo_field(stored.as_deref()), Some(vec![7, 8, 9]));
    }
}
