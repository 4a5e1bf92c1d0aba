use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::pos::{self, CartEntry, NewLine, PricedProduct, ProductIndex};
use crate::services::invoice_service::{format_invoice_number, reserve_on};

#[derive(Clone)]
pub struct TransactionService {
    pool: DbPool,
}

impl TransactionService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Creates a transaction from a client cart: reserves an invoice
    /// number, expands combos into grouped component lines and persists
    /// the header plus all lines in one database transaction.
    pub async fn checkout(
        &self,
        business_id: i64,
        request: CheckoutRequest,
    ) -> AppResult<TransactionResponse> {
        if request.items.is_empty() {
            return Err(AppError::ValidationError("Cart is empty".to_string()));
        }

        let index = self.load_product_index(business_id).await?;
        let cart: Vec<CartEntry> = request
            .items
            .iter()
            .map(|i| CartEntry {
                product_id: i.product_id,
                quantity: i.quantity,
                unit_price_inc_tax: i.unit_price_inc_tax,
            })
            .collect();

        let lines = pos::expand_cart(&cart, &index);
        let final_total = pos::lines_total(&lines);

        let mut tx = self.pool.begin().await?;

        let (prefix, number, _) = reserve_on(&mut *tx, business_id, request.location_id).await?;
        let invoice_no = format_invoice_number(&prefix, number);

        let result = sqlx::query(
            r#"
            INSERT INTO transactions
                (business_id, location_id, contact_id, invoice_no, status,
                 payment_status, final_total, created_at, updated_at)
            VALUES (?, ?, ?, ?, 'final', 'due', ?, NOW(), NOW())
            "#,
        )
        .bind(business_id)
        .bind(request.location_id)
        .bind(request.contact_id)
        .bind(&invoice_no)
        .bind(final_total)
        .execute(&mut *tx)
        .await?;

        let transaction_id = result.last_insert_id() as i64;
        insert_lines(&mut tx, transaction_id, &lines).await?;

        tx.commit().await?;

        log::info!(
            "Checkout: transaction {} ({}) with {} lines, total {}",
            transaction_id,
            invoice_no,
            lines.len(),
            final_total
        );

        self.get(business_id, transaction_id).await
    }

    pub async fn list(
        &self,
        business_id: i64,
        query: &TransactionQuery,
    ) -> AppResult<PaginatedResponse<TransactionResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let offset = params.get_offset();
        let limit = params.get_limit();

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE business_id = ?")
                .bind(business_id)
                .fetch_one(&self.pool)
                .await?;

        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, business_id, location_id, contact_id, invoice_no, status,
                   payment_status, final_total, created_at, updated_at
            FROM transactions
            WHERE business_id = ?
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(business_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let items: Vec<TransactionResponse> = transactions
            .into_iter()
            .map(|t| TransactionResponse::from_row(t, None))
            .collect();

        Ok(PaginatedResponse::new(
            items,
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(20),
            total,
        ))
    }

    pub async fn get(&self, business_id: i64, id: i64) -> AppResult<TransactionResponse> {
        let transaction = self.fetch_transaction(business_id, id).await?;
        let lines = self.get_items(business_id, id).await?;
        Ok(TransactionResponse::from_row(transaction, Some(lines)))
    }

    pub async fn get_items(&self, business_id: i64, id: i64) -> AppResult<Vec<TransactionLine>> {
        // Tenant check goes through the header row.
        self.fetch_transaction(business_id, id).await?;

        let lines = sqlx::query_as::<_, TransactionLine>(
            r#"
            SELECT id, transaction_id, product_id, variation_id, quantity,
                   unit_price, unit_price_inc_tax, tax_amount, combo_group_id
            FROM transaction_sell_lines
            WHERE transaction_id = ?
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Replaces a transaction's lines wholesale: delete-all, rebuild-all,
    /// in one database transaction.
    pub async fn replace_items(
        &self,
        business_id: i64,
        id: i64,
        request: ReplaceItemsRequest,
    ) -> AppResult<TransactionResponse> {
        if request.items.is_empty() {
            return Err(AppError::ValidationError("Cart is empty".to_string()));
        }

        self.fetch_transaction(business_id, id).await?;

        let index = self.load_product_index(business_id).await?;
        let cart: Vec<CartEntry> = request
            .items
            .iter()
            .map(|i| CartEntry {
                product_id: i.product_id,
                quantity: i.quantity,
                unit_price_inc_tax: i.unit_price_inc_tax,
            })
            .collect();

        let lines = pos::expand_cart(&cart, &index);
        let final_total = pos::lines_total(&lines);

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM transaction_sell_lines WHERE transaction_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_lines(&mut tx, id, &lines).await?;

        sqlx::query(
            "UPDATE transactions SET final_total = ?, updated_at = NOW() WHERE id = ?",
        )
        .bind(final_total)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get(business_id, id).await
    }

    pub async fn delete(&self, business_id: i64, id: i64) -> AppResult<()> {
        self.fetch_transaction(business_id, id).await?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM transaction_sell_lines WHERE transaction_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    async fn fetch_transaction(&self, business_id: i64, id: i64) -> AppResult<Transaction> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, business_id, location_id, contact_id, invoice_no, status,
                   payment_status, final_total, created_at, updated_at
            FROM transactions
            WHERE id = ? AND business_id = ?
            "#,
        )
        .bind(id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transaction {id} not found")))
    }

    /// Prefetches every product of the tenant with its primary variation,
    /// so cart expansion runs without further queries.
    async fn load_product_index(&self, business_id: i64) -> AppResult<ProductIndex> {
        let rows = sqlx::query_as::<_, ProductWithVariation>(
            r#"
            SELECT p.id, p.name, p.combo,
                   v.id AS variation_id, v.sell_price_inc_tax, v.tax_percent
            FROM products p
            LEFT JOIN variations v ON v.id = (
                SELECT MIN(id) FROM variations WHERE product_id = p.id
            )
            WHERE p.business_id = ?
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        let mut index = ProductIndex::new();
        for row in rows {
            index.insert(
                row.id,
                PricedProduct {
                    variation_id: row.variation_id,
                    sell_price_inc_tax: row.sell_price_inc_tax.unwrap_or(0.0),
                    tax_percent: row.tax_percent,
                    combo: row.combo,
                },
            );
        }
        Ok(index)
    }
}

async fn insert_lines(
    tx: &mut sqlx::Transaction<'_, sqlx::MySql>,
    transaction_id: i64,
    lines: &[NewLine],
) -> AppResult<()> {
    for line in lines {
        sqlx::query(
            r#"
            INSERT INTO transaction_sell_lines
                (transaction_id, product_id, variation_id, quantity,
                 unit_price, unit_price_inc_tax, tax_amount, combo_group_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(transaction_id)
        .bind(line.product_id)
        .bind(line.variation_id)
        .bind(line.quantity)
        .bind(line.unit_price_exc_tax)
        .bind(line.unit_price_inc_tax)
        .bind(line.tax_amount)
        .bind(&line.combo_group_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
