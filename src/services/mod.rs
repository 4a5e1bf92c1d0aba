pub mod auth_service;
pub mod invoice_service;
pub mod order_area_service;
pub mod product_service;
pub mod recipe_service;
pub mod table_service;
pub mod transaction_service;

pub use auth_service::AuthService;
pub use invoice_service::InvoiceService;
pub use order_area_service::OrderAreaService;
pub use product_service::ProductService;
pub use recipe_service::RecipeService;
pub use table_service::TableService;
pub use transaction_service::TransactionService;
