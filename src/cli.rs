//! CLI argument parsing for txlens.

use crate::config::{
    DEFAULT_ADDRESS_LEN, DEFAULT_ADDRESS_PREFIX, DEFAULT_MAX_RELAY_DEPTH, DecoderConfig,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Transaction decoder for bech32 account chains.
///
/// Decodes transaction data fields into function calls and token
/// transfers, and recovers smart-contract outcomes from executed
/// transactions.
#[derive(Parser, Debug)]
#[command(
    name = "txlens",
    version,
    about = "Decode transaction data fields and smart-contract outcomes",
    after_help = r#"EXAMPLES:
    txlens metadata tx.json             Decode function call and transfers
    txlens metadata '{"data":"..."}'    Inline transaction JSON
    cat tx.json | txlens metadata       Read from stdin
    txlens outcome tx.json              Recover return code and values
    txlens outcome tx.json --json       JSON output
    txlens address erd1qqqq...          Show the raw bytes of an address
    txlens address 0000...a468          Encode raw hex as bech32

INPUT:
    A node transaction object, or a gateway response of the form
    {"data":{"transaction":{...}}}."#
)]
pub struct Args {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Output as JSON.
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Bech32 prefix of account addresses.
    #[arg(long, global = true, env = "TXLENS_ADDRESS_PREFIX", default_value = DEFAULT_ADDRESS_PREFIX)]
    pub address_prefix: String,

    /// Maximum number of nested relayed transactions to unwrap.
    #[arg(long, global = true, env = "TXLENS_MAX_RELAY_DEPTH", default_value_t = DEFAULT_MAX_RELAY_DEPTH)]
    pub max_relay_depth: usize,

    /// Log filter for diagnostics on stderr (e.g. `debug`, `txlens=trace`).
    /// Falls back to RUST_LOG, then `warn`.
    #[arg(long, global = true, env = "TXLENS_LOG")]
    pub log_level: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a transaction's data field.
    ///
    /// Shows the called function, its arguments and any token transfers,
    /// unwrapping relayed transactions.
    Metadata {
        /// Transaction JSON file, inline JSON, or `-` for stdin.
        input: Option<String>,
    },

    /// Recover the smart-contract outcome of an executed transaction.
    ///
    /// Reads smart-contract results and log events and reports the return
    /// code, message and return values.
    Outcome {
        /// Transaction JSON file, inline JSON, or `-` for stdin.
        input: Option<String>,
    },

    /// Convert an address between bech32 and hex.
    Address {
        /// A bech32 address or its raw bytes as hex.
        address: String,
    },
}

/// Specifies how to obtain the input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// Read from stdin.
    Stdin,
    /// Read from a file path.
    File(PathBuf),
    /// JSON given directly on the command line.
    Inline(String),
}

impl Args {
    /// Decoder settings from flags and environment.
    pub fn config(&self) -> DecoderConfig {
        DecoderConfig {
            address_prefix: self.address_prefix.clone(),
            address_len: DEFAULT_ADDRESS_LEN,
            max_relay_depth: self.max_relay_depth,
        }
    }

    /// Log filter directives, in order of precedence.
    pub fn log_directives(&self) -> String {
        self.log_level
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "warn".to_string())
    }
}

impl InputSpec {
    /// Resolve an optional positional argument.
    pub fn resolve(input: Option<&str>) -> Self {
        match input {
            None | Some("-") => InputSpec::Stdin,
            Some(s) => InputSpec::detect(s),
        }
    }

    /// Detect input type from a string argument.
    pub fn detect(s: &str) -> Self {
        // JSON objects always start with a brace; anything else is a path
        if s.trim_start().starts_with('{') {
            return InputSpec::Inline(s.to_string());
        }
        InputSpec::File(PathBuf::from(s))
    }
}
