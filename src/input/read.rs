//! Input reading implementation.

use crate::cli::InputSpec;
use crate::decode::TransactionToDecode;
use crate::error::{Error, Result};
use crate::input::InputSource;
use crate::outcome::ApiTransactionResult;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::fs;
use std::io::{self, Read};

/// Read the raw input text from the specified source.
pub fn read_input(spec: &InputSpec) -> Result<String> {
    let text = match InputSource::from_spec(spec)? {
        InputSource::File(path) => fs::read_to_string(&path).map_err(|e| Error::IoError {
            path: Some(path),
            source: e,
        })?,

        InputSource::Text(text) => text,

        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| Error::IoError {
                    path: None,
                    source: e,
                })?;
            buffer
        }
    };

    if text.trim().is_empty() {
        return Err(Error::NoInput);
    }
    Ok(text)
}

/// Read a transaction whose data field should be decoded.
pub fn read_transaction(spec: &InputSpec) -> Result<TransactionToDecode> {
    parse_document(&read_input(spec)?)
}

/// Read an executed transaction with its results and logs.
pub fn read_transaction_result(spec: &InputSpec) -> Result<ApiTransactionResult> {
    let mut tx: ApiTransactionResult = parse_document(&read_input(spec)?)?;
    tx.normalize_receivers();
    Ok(tx)
}

/// Parse a transaction document, unwrapping a gateway response envelope.
pub fn parse_document<T: DeserializeOwned>(text: &str) -> Result<T> {
    let mut document: JsonValue = serde_json::from_str(text)?;

    let inner = document
        .get_mut("data")
        .and_then(|data| data.get_mut("transaction"))
        .map(JsonValue::take);
    if let Some(tx) = inner {
        document = tx;
    }

    Ok(serde_json::from_value(document)?)
}
