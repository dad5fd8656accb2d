//! Display formatting for terminal output

pub mod account;
pub mod category;
pub mod report;
pub mod transaction;

pub use account::format_account_list;
pub use category::format_category_registry;
pub use transaction::{format_transaction_register, RegisterStyle};
