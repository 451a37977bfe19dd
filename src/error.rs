//! Error types for txlens.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for txlens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the address codec.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AddressError {
    /// The text is not valid bech32.
    #[error("invalid bech32 address: {0}")]
    Bech32(String),

    /// The address was encoded with a different human-readable prefix.
    #[error("wrong address prefix: expected '{expected}', found '{found}'")]
    WrongPrefix { expected: String, found: String },

    /// The raw address does not have the configured length.
    #[error("invalid address length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },

    /// The hex form of an address could not be decoded.
    #[error("invalid hex address: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Errors raised while decoding a transaction's data field.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The decimal value could not be parsed as a non-negative integer.
    #[error("failed to set value")]
    ValueSet,

    /// The data field is not valid base64.
    #[error("failed to decode transaction data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// An argument that must be hex is not.
    #[error("failed to decode {field}: {source}")]
    InvalidHex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    /// An argument that must be a base-16 big integer is not.
    #[error("failed to parse {field} as a base-16 integer: '{value}'")]
    InvalidBigInt { field: &'static str, value: String },

    /// A recognized function was called with too few arguments.
    #[error("not enough arguments for {function}: required [{required}], found [{found}]")]
    NotEnoughArguments {
        function: &'static str,
        required: usize,
        found: usize,
    },

    /// An argument that must be a raw address has the wrong length.
    #[error("invalid address")]
    InvalidAddress,

    /// Address conversion failed.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// The relayed inner transaction is not a valid envelope.
    #[error("failed to unmarshal inner transaction: {0}")]
    InvalidRelayedPayload(#[from] serde_json::Error),

    /// Relayed envelopes are nested deeper than allowed.
    #[error("relayed transaction nesting exceeds the maximum depth of {max}")]
    MaxRelayDepthExceeded { max: usize },
}

/// Errors raised while recovering a smart-contract outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The data field to slice is empty.
    #[error("empty data field")]
    EmptyDataField,

    /// The data field does not have the `@<code>@<values>` shape.
    #[error("cannot process data field")]
    CannotProcessDataField,

    /// The return code component is empty.
    #[error("no return code")]
    NoReturnCode,

    /// A single-match event search found several candidates.
    #[error("found more than one event with identifier '{identifier}'")]
    FoundMoreThanOneEvent { identifier: String },
}

/// Errors that can occur in the txlens CLI.
#[derive(Error, Debug)]
pub enum Error {
    /// No input was provided (no file, no stdin, no inline JSON).
    #[error("No input provided. Use: txlens <command> <file>, inline JSON, or pipe JSON to stdin")]
    NoInput,

    /// The specified file was not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// An I/O error occurred.
    #[error("IO error{}: {source}", path.as_ref().map(|p| format!(" reading {}", p.display())).unwrap_or_default())]
    IoError {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// The input is not a valid transaction JSON document.
    #[error("Invalid transaction JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Address conversion failed.
    #[error("Invalid address: {0}")]
    Address(#[from] AddressError),

    /// Data-field decoding failed.
    #[error("Failed to decode transaction metadata: {0}")]
    Decode(#[from] DecodeError),

    /// Outcome parsing failed.
    #[error("Failed to parse result outcome: {0}")]
    Parse(#[from] ParseError),

    /// Output formatting error.
    #[error("Format error: {0}")]
    FormatError(String),
}

impl Error {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Decoding failures
            Error::Decode(_) | Error::Parse(_) => 1,
            // Malformed input encodings
            Error::InvalidJson(_) | Error::Address(_) => 2,
            // I/O errors
            Error::NoInput | Error::FileNotFound(_) | Error::IoError { .. } => 3,
            // Format errors
            Error::FormatError(_) => 5,
        }
    }
}
