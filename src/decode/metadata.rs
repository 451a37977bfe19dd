//! Input and output records of the data-field decoder.

use crate::encoding::{decimal, nullable};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// The transaction whose data field is decoded into metadata.
///
/// Field names follow the node's JSON transaction representation, so a
/// transaction fetched from an observer deserializes directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransactionToDecode {
    /// Sender address (bech32).
    #[serde(default)]
    pub sender: String,
    /// Receiver address (bech32).
    #[serde(default)]
    pub receiver: String,
    /// Base64 data field; empty when the transaction carries no data.
    #[serde(default, deserialize_with = "nullable")]
    pub data: String,
    /// Decimal value; empty means zero.
    #[serde(default, deserialize_with = "nullable")]
    pub value: String,
}

/// The decoded view of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMetadata {
    pub sender: String,
    pub receiver: String,
    #[serde(serialize_with = "decimal")]
    pub value: BigUint,
    /// Called function, present only for well-formed smart-contract calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    /// Hex arguments of the call; absent whenever `function_name` is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_args: Option<Vec<String>>,
    pub transfers: Vec<TransactionMetadataTransfer>,
}

impl TransactionMetadata {
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, value: BigUint) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            value,
            function_name: None,
            function_args: None,
            transfers: Vec::new(),
        }
    }

    /// Function name and arguments, when both are present.
    pub fn call(&self) -> Option<(&str, &[String])> {
        match (&self.function_name, &self.function_args) {
            (Some(name), Some(args)) => Some((name.as_str(), args.as_slice())),
            _ => None,
        }
    }
}

/// One token movement carried by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionMetadataTransfer {
    #[serde(serialize_with = "decimal")]
    pub value: BigUint,
    pub properties: TokenTransferProperties,
}

/// Identifies the token moved by a transfer.
///
/// Fungible transfers set `token`; NFT/SFT transfers set `collection` and
/// `identifier`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenTransferProperties {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub collection: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub identifier: String,
}

impl TokenTransferProperties {
    /// Properties of a fungible token transfer.
    pub fn fungible(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Properties of an NFT/SFT transfer; the nonce is kept as hex text.
    pub fn non_fungible(collection: impl Into<String>, nonce: &str) -> Self {
        let collection = collection.into();
        let identifier = format!("{collection}-{nonce}");
        Self {
            collection,
            identifier,
            ..Self::default()
        }
    }
}
