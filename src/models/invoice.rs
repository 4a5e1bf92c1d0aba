use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InvoiceScheme {
    pub id: i64,
    pub business_id: i64,
    pub prefix: String,
    pub start_number: i64,
    pub invoice_count: i64,
}

impl InvoiceScheme {
    /// The number the next reservation will hand out: start + count.
    pub fn next_number(&self) -> i64 {
        self.start_number + self.invoice_count
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InvoiceNumberResponse {
    pub prefix: String,
    pub next_number: i64,
    pub current_count: i64,
    /// Formatted `{prefix}{number}` string.
    pub invoice_number: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InvoiceQuery {
    pub location_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReserveInvoiceRequest {
    pub location_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_number_is_start_plus_count() {
        let scheme = InvoiceScheme {
            id: 1,
            business_id: 1,
            prefix: "INV-".to_string(),
            start_number: 1,
            invoice_count: 0,
        };
        assert_eq!(scheme.next_number(), 1);

        let advanced = InvoiceScheme {
            invoice_count: 41,
            ..scheme
        };
        assert_eq!(advanced.next_number(), 42);
    }
}
