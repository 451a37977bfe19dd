//! Relayed-transaction envelopes.
//!
//! A relayer pays gas for an inner transaction and wraps it in a
//! `relayedTx` (v1, JSON payload) or `relayedTxV2` (positional arguments)
//! call. Unwrapping yields a fresh [`TransactionToDecode`] describing the
//! inner transaction, which the decoder then decodes in turn.

use crate::address::AddressCodec;
use crate::decode::TransactionMetadata;
use crate::decode::data_field::parse_decimal;
use crate::decode::metadata::TransactionToDecode;
use crate::error::DecodeError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer};

pub const RELAYED_TX_V1: &str = "relayedTx";
pub const RELAYED_TX_V2: &str = "relayedTxV2";

/// The inner transaction carried by a `relayedTx` envelope.
///
/// Addresses, data and chain ID are base64 as the node serializes them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerTransaction {
    #[serde(default)]
    pub nonce: u64,
    pub sender: String,
    pub receiver: String,
    #[serde(default, deserialize_with = "amount")]
    pub value: BigUint,
    #[serde(default)]
    pub gas_price: u64,
    #[serde(default)]
    pub gas_limit: u64,
    #[serde(default, deserialize_with = "crate::encoding::nullable")]
    pub data: String,
    #[serde(default)]
    pub signature: String,
    #[serde(default, rename = "chainID")]
    pub chain_id: String,
    #[serde(default)]
    pub version: u32,
}

/// If `metadata` is a relayed call, rebuild the inner transaction.
///
/// Returns `Ok(None)` for anything that is not a relayed envelope with the
/// expected arity.
pub fn unwrap_envelope(
    metadata: &TransactionMetadata,
    codec: &dyn AddressCodec,
) -> Result<Option<TransactionToDecode>, DecodeError> {
    let Some((function, args)) = metadata.call() else {
        return Ok(None);
    };

    match (function, args) {
        (RELAYED_TX_V1, [payload]) => parse_relayed_v1(payload, codec).map(Some),
        (RELAYED_TX_V2, [receiver, _nonce, data, _signature]) => {
            parse_relayed_v2(&metadata.receiver, receiver, data, codec).map(Some)
        }
        _ => Ok(None),
    }
}

fn parse_relayed_v1(
    payload: &str,
    codec: &dyn AddressCodec,
) -> Result<TransactionToDecode, DecodeError> {
    let json = hex::decode(payload).map_err(|source| DecodeError::InvalidHex {
        field: "relayed payload",
        source,
    })?;
    let inner: InnerTransaction = serde_json::from_slice(&json)?;

    Ok(TransactionToDecode {
        sender: address_from_base64(&inner.sender, codec)?,
        receiver: address_from_base64(&inner.receiver, codec)?,
        data: inner.data,
        value: inner.value.to_string(),
    })
}

fn parse_relayed_v2(
    outer_receiver: &str,
    receiver_hex: &str,
    data_hex: &str,
    codec: &dyn AddressCodec,
) -> Result<TransactionToDecode, DecodeError> {
    let data = hex::decode(data_hex).map_err(|source| DecodeError::InvalidHex {
        field: "relayed data",
        source,
    })?;

    Ok(TransactionToDecode {
        sender: outer_receiver.to_string(),
        receiver: codec.encode_hex(receiver_hex)?,
        data: BASE64.encode(data),
        value: "0".to_string(),
    })
}

fn address_from_base64(encoded: &str, codec: &dyn AddressCodec) -> Result<String, DecodeError> {
    let bytes = BASE64.decode(encoded)?;
    Ok(codec.encode(&bytes)?)
}

/// Accept the inner value either as a JSON number or as a decimal string.
fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(u64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(BigUint::from(n)),
        Amount::Text(text) => parse_decimal(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid value '{text}'"))),
    }
}
