use sqlx::MySqlConnection;

use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;

/// Renders the full invoice number for a reserved sequence value.
pub fn format_invoice_number(prefix: &str, number: i64) -> String {
    format!("{prefix}{number}")
}

/// The number a reservation handed out, given the counter value AFTER its
/// increment: the n-th reservation (count now n) gets `start + n - 1`.
fn reserved_number(start_number: i64, new_count: i64) -> i64 {
    start_number + new_count - 1
}

/// Atomically increments a location's invoice counter and returns
/// `(prefix, reserved_number, new_count)`.
///
/// The increment captures the post-update count via `LAST_INSERT_ID(expr)`,
/// so the reserved number is read back on the same connection in the same
/// round trip sequence; concurrent reservations for one location can never
/// observe each other's number.
pub(crate) async fn reserve_on(
    conn: &mut MySqlConnection,
    business_id: i64,
    location_id: i64,
) -> AppResult<(String, i64, i64)> {
    let result = sqlx::query(
        r#"
        UPDATE invoice_schemes s
        JOIN business_locations l ON l.invoice_scheme_id = s.id
        SET s.invoice_count = LAST_INSERT_ID(s.invoice_count + 1)
        WHERE l.id = ? AND l.business_id = ?
        "#,
    )
    .bind(location_id)
    .bind(business_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "No invoice scheme bound to location {location_id}"
        )));
    }

    let new_count: i64 = sqlx::query_scalar("SELECT LAST_INSERT_ID()")
        .fetch_one(&mut *conn)
        .await?;

    let (prefix, start_number): (String, i64) = sqlx::query_as(
        r#"
        SELECT s.prefix, s.start_number
        FROM invoice_schemes s
        JOIN business_locations l ON l.invoice_scheme_id = s.id
        WHERE l.id = ? AND l.business_id = ?
        "#,
    )
    .bind(location_id)
    .bind(business_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok((prefix, reserved_number(start_number, new_count), new_count))
}

#[derive(Clone)]
pub struct InvoiceService {
    pool: DbPool,
}

impl InvoiceService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Returns the next invoice number for a location without reserving it.
    pub async fn peek(&self, business_id: i64, location_id: i64) -> AppResult<InvoiceNumberResponse> {
        let scheme = sqlx::query_as::<_, InvoiceScheme>(
            r#"
            SELECT s.id, s.business_id, s.prefix, s.start_number, s.invoice_count
            FROM invoice_schemes s
            JOIN business_locations l ON l.invoice_scheme_id = s.id
            WHERE l.id = ? AND l.business_id = ?
            "#,
        )
        .bind(location_id)
        .bind(business_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No invoice scheme bound to location {location_id}"))
        })?;

        let next_number = scheme.next_number();
        Ok(InvoiceNumberResponse {
            invoice_number: format_invoice_number(&scheme.prefix, next_number),
            prefix: scheme.prefix,
            next_number,
            current_count: scheme.invoice_count,
        })
    }

    /// Reserves the next invoice number for a location.
    pub async fn reserve(
        &self,
        business_id: i64,
        location_id: i64,
    ) -> AppResult<InvoiceNumberResponse> {
        let mut tx = self.pool.begin().await?;
        let (prefix, number, new_count) = reserve_on(&mut *tx, business_id, location_id).await?;
        tx.commit().await?;

        log::info!(
            "Reserved invoice number {}{} for location {}",
            prefix,
            number,
            location_id
        );

        Ok(InvoiceNumberResponse {
            invoice_number: format_invoice_number(&prefix, number),
            prefix,
            next_number: number + 1,
            current_count: new_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_invoice_number() {
        assert_eq!(format_invoice_number("INV-", 1), "INV-1");
        assert_eq!(format_invoice_number("", 207), "207");
    }

    // Scheme {prefix INV-, start 1, count 0}: the first reservation bumps
    // the count to 1 and must yield INV-1, the second INV-2.
    #[test]
    fn test_reserved_number_sequence_from_fresh_scheme() {
        assert_eq!(format_invoice_number("INV-", reserved_number(1, 1)), "INV-1");
        assert_eq!(format_invoice_number("INV-", reserved_number(1, 2)), "INV-2");
    }

    #[test]
    fn test_reserved_number_respects_start_offset() {
        // start 1000, 5 numbers already handed out; the 6th is 1005.
        assert_eq!(reserved_number(1000, 6), 1005);
    }
}
