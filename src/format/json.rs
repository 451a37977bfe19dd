//! JSON output formatting.

use crate::error::{Error, Result};
use crate::format::Report;

/// Format a report as JSON.
pub fn format_json(report: Report<'_>) -> Result<String> {
    let rendered = match report {
        Report::Metadata(metadata) => serde_json::to_string_pretty(metadata),
        Report::Outcome(outcome) => serde_json::to_string_pretty(&outcome),
        Report::Address(forms) => serde_json::to_string_pretty(forms),
    };
    rendered.map_err(|e| Error::FormatError(e.to_string()))
}
