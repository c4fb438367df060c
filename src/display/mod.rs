//! Display formatting for terminal output
//!
//! Plain-text renderings of transactions, categories, suggestions and chat
//! answers.
//! Reports carry their own `format_terminal`.

pub mod category;
pub mod chat;
pub mod suggestion;
pub mod transaction;

pub use category::format_category_list;
pub use chat::format_chat;
pub use suggestion::format_suggestion;
pub use transaction::{format_transaction_details, format_transaction_register, format_transaction_row};
