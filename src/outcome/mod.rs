//! Smart-contract outcome recovery.
//!
//! An executed transaction does not state its result directly. The return
//! code and values are scattered across smart-contract results and log
//! events; [`OutcomeParser`] runs a fixed chain of recognizers to find them.

pub mod events;
mod parser;
mod slicing;
mod types;

pub use events::{
    COMPLETED_TX_EVENT, SIGNAL_ERROR, TOO_MUCH_GAS, WRITE_LOG, find_single_or_none,
};
pub use parser::OutcomeParser;
pub use slicing::{DataFieldParts, slice_data_field_in_parts};
pub use types::{
    ApiLogs, ApiReceipt, ApiSmartContractResult, ApiTransactionResult, Event, ResultOutcome,
    ReturnCode,
};
