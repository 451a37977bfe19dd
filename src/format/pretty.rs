//! Pretty terminal output with colors and tables.

use crate::address::AddressForms;
use crate::decode::{TransactionMetadata, TransactionMetadataTransfer};
use crate::format::Report;
use crate::outcome::ResultOutcome;
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table, presets};

/// Format a report as pretty terminal output.
pub fn format_pretty(report: Report<'_>) -> String {
    match report {
        Report::Metadata(metadata) => format_metadata(metadata),
        Report::Outcome(outcome) => format_outcome(outcome),
        Report::Address(forms) => format_address(forms),
    }
}

fn format_metadata(metadata: &TransactionMetadata) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "Transaction".bold().cyan()));
    output.push_str(&format!("  {} {}\n", "Sender:".dimmed(), metadata.sender));
    output.push_str(&format!("  {} {}\n", "Receiver:".dimmed(), metadata.receiver));
    output.push_str(&format!(
        "  {} {}\n\n",
        "Value:".dimmed(),
        format_number_with_separators(&metadata.value.to_string())
            .as_str()
            .yellow()
    ));

    if let Some((function, args)) = metadata.call() {
        output.push_str(&format!("{}\n", "Call".bold().cyan()));
        output.push_str(&format!("  {} {}\n", "Function:".dimmed(), function.green()));
        if !args.is_empty() {
            output.push_str(&format!(
                "{} ({})\n",
                "Arguments".bold().cyan(),
                args.len()
            ));
            output.push_str(&format_arguments_table(args));
        }
        output.push('\n');
    }

    if !metadata.transfers.is_empty() {
        output.push_str(&format!(
            "{} ({})\n",
            "Transfers".bold().cyan(),
            metadata.transfers.len()
        ));
        output.push_str(&format_transfers_table(&metadata.transfers));
    }

    output
}

fn format_arguments_table(args: &[String]) -> String {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(comfy_table::Color::DarkGrey),
        Cell::new("Hex").fg(comfy_table::Color::DarkGrey),
        Cell::new("Text").fg(comfy_table::Color::DarkGrey),
    ]);

    for (idx, arg) in args.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx),
            Cell::new(truncate_hash(arg, 32)),
            Cell::new(printable_text(arg).unwrap_or_default()),
        ]);
    }

    format!("{}\n", table)
}

fn format_transfers_table(transfers: &[TransactionMetadataTransfer]) -> String {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(comfy_table::Color::DarkGrey),
        Cell::new("Token").fg(comfy_table::Color::DarkGrey),
        Cell::new("Value").fg(comfy_table::Color::DarkGrey),
    ]);

    for (idx, transfer) in transfers.iter().enumerate() {
        let props = &transfer.properties;
        let token = if props.identifier.is_empty() {
            props.token.as_str()
        } else {
            props.identifier.as_str()
        };

        table.add_row(vec![
            Cell::new(idx),
            Cell::new(token),
            Cell::new(format_number_with_separators(&transfer.value.to_string())),
        ]);
    }

    format!("{}\n", table)
}

fn format_outcome(outcome: Option<&ResultOutcome>) -> String {
    let Some(outcome) = outcome else {
        return format!("{}\n", "Outcome could not be determined".yellow());
    };

    let mut output = String::new();
    let code = if outcome.return_code.as_str().is_empty() {
        "(none)".to_string()
    } else {
        outcome.return_code.to_string()
    };

    output.push_str(&format!("{}\n", "Outcome".bold().cyan()));
    output.push_str(&format!(
        "  {} {}\n",
        "Return code:".dimmed(),
        if outcome.return_code.is_success() {
            code.as_str().green()
        } else {
            code.as_str().red()
        }
    ));
    output.push_str(&format!(
        "  {} {}\n",
        "Message:".dimmed(),
        outcome.return_message
    ));

    if !outcome.values.is_empty() {
        output.push_str(&format!(
            "\n{} ({})\n",
            "Values".bold().cyan(),
            outcome.values.len()
        ));
        for (idx, value) in outcome.values.iter().enumerate() {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{idx}:").as_str().dimmed(),
                String::from_utf8_lossy(value)
            ));
        }
    }

    output
}

fn format_address(forms: &AddressForms) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "Address Details".bold().cyan()));
    output.push_str(&format!("  {}: {}\n", "Address".bold(), forms.bech32));
    output.push_str(&format!("  {}: {}\n", "Hex".bold(), forms.hex.as_str().dimmed()));
    output.push_str(&format!(
        "  {}: {}\n",
        "Type".bold(),
        if forms.is_contract {
            "smart contract".green()
        } else {
            "account".green()
        }
    ));

    output
}

/// Hex argument as text, when it decodes to printable ASCII.
fn printable_text(arg: &str) -> Option<String> {
    let bytes = hex::decode(arg).ok()?;
    if bytes.is_empty() || !bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        return None;
    }
    String::from_utf8(bytes).ok()
}

fn format_number_with_separators(digits: &str) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

fn truncate_hash(hash: &str, max_len: usize) -> String {
    if hash.len() <= max_len {
        hash.to_string()
    } else {
        let half = (max_len - 3) / 2;
        format!("{}...{}", &hash[..half], &hash[hash.len() - half..])
    }
}
