//! Input detection and reading module.

mod detect;
mod read;

pub use detect::InputSource;
pub use read::{parse_document, read_input, read_transaction, read_transaction_result};
