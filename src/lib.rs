//! txlens - transaction decoder for bech32 account chains.
//!
//! Turns the opaque parts of a transaction into structured records.
//!
//! # Features
//!
//! - Decode `@`-delimited data fields into function calls and arguments
//! - Recognize ESDT, NFT/SFT and multi-token transfers
//! - Unwrap relayed transactions (v1 and v2), with a bounded nesting depth
//! - Recover return code, message and values of smart-contract calls from
//!   their results and log events
//! - Convert addresses between bech32 and hex
//! - Pretty terminal output with colors, or JSON for piping

pub mod address;
pub mod cli;
pub mod config;
pub mod decode;
mod encoding;
pub mod error;
pub mod format;
pub mod input;
pub mod logging;
pub mod outcome;

pub use cli::Args;
pub use error::{Error, Result};

use address::AddressForms;
use cli::{Command, InputSpec};
use decode::DataFieldDecoder;
use format::{Report, format_output};
use input::{read_transaction, read_transaction_result};
use logging::Logger;
use outcome::OutcomeParser;

/// Run txlens with the given arguments.
pub fn run(args: &Args) -> Result<()> {
    let config = args.config();
    let logger = Logger::stderr(&args.log_directives());

    let output = match &args.command {
        Command::Metadata { input } => {
            let tx = read_transaction(&InputSpec::resolve(input.as_deref()))?;
            let metadata = DataFieldDecoder::from_config(&config)
                .with_logger(logger)
                .decode(&tx)?;
            format_output(Report::Metadata(&metadata), args)?
        }

        Command::Outcome { input } => {
            let tx = read_transaction_result(&InputSpec::resolve(input.as_deref()))?;
            let outcome = OutcomeParser::from_config(&config)
                .with_logger(logger)
                .parse(&tx)?;
            format_output(Report::Outcome(outcome.as_ref()), args)?
        }

        Command::Address { address } => {
            let forms = AddressForms::resolve(&config.codec(), address)?;
            format_output(Report::Address(&forms), args)?
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}
