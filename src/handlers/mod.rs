pub mod auth;
pub mod invoice;
pub mod order_area;
pub mod product;
pub mod recipe;
pub mod table;
pub mod transaction;

pub use auth::auth_config;
pub use invoice::invoice_config;
pub use order_area::order_area_config;
pub use product::product_config;
pub use recipe::recipe_config;
pub use table::table_config;
pub use transaction::transaction_config;

use actix_web::{HttpMessage, HttpRequest};

use crate::error::{AppError, AppResult};
use crate::utils::AuthContext;

/// Pulls the identity the auth middleware attached to the request.
pub(crate) fn auth_context(req: &HttpRequest) -> AppResult<AuthContext> {
    req.extensions()
        .get::<AuthContext>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Missing authentication context".to_string()))
}
