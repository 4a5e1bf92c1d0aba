pub mod common;
pub mod invoice;
pub mod order_area;
pub mod pagination;
pub mod product;
pub mod recipe;
pub mod table;
pub mod transaction;
pub mod user;

pub use common::*;
pub use invoice::*;
pub use order_area::*;
pub use pagination::*;
pub use product::*;
pub use recipe::*;
pub use table::*;
pub use transaction::*;
pub use user::*;
