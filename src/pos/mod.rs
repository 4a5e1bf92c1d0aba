//! Pure point-of-sale domain logic: tax math, combo expansion, split-bill
//! allocation and table state. No I/O here; the services layer feeds these
//! functions with rows it has already fetched.

pub mod combo;
pub mod order_lines;
pub mod split;
pub mod tables;
pub mod tax;

pub use combo::{ComboSequence, parse_combo_field};
pub use order_lines::{CartEntry, NewLine, PricedProduct, ProductIndex, expand_cart, lines_total};
pub use split::{Allocation, Bill, SplitState};
pub use tables::{Floor, OrderItem, Table, TableOrder, TableStatus};
pub use tax::{DEFAULT_TAX_PERCENT, LinePricing, price_from_inclusive, round2};
