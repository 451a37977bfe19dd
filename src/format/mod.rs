//! Output formatting module.

mod json;
mod pretty;

use crate::address::AddressForms;
use crate::cli::Args;
use crate::decode::TransactionMetadata;
use crate::error::Result;
use crate::outcome::ResultOutcome;

pub use json::format_json;
pub use pretty::format_pretty;

/// A result ready to be rendered.
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    Metadata(&'a TransactionMetadata),
    /// `None` when the outcome could not be determined.
    Outcome(Option<&'a ResultOutcome>),
    Address(&'a AddressForms),
}

/// Format a report according to the output flags.
pub fn format_output(report: Report<'_>, args: &Args) -> Result<String> {
    if args.json {
        format_json(report)
    } else {
        Ok(format_pretty(report))
    }
}
