//! The data-field decoder.

use crate::address::AddressCodec;
use crate::config::DecoderConfig;
use crate::decode::metadata::{TransactionMetadata, TransactionToDecode};
use crate::decode::relayed::unwrap_envelope;
use crate::decode::transfers::{TRANSFER_RECOGNIZERS, is_smart_contract_argument};
use crate::error::DecodeError;
use crate::logging::Logger;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use num_bigint::BigUint;
use std::sync::Arc;

/// Decodes a transaction's `@`-delimited data field into [`TransactionMetadata`].
///
/// Decoding order:
/// 1. Value, function name and hex arguments of the (innermost) call,
///    unwrapping relayed envelopes recursively up to `max_relay_depth`.
/// 2. `ESDTTransfer`, `ESDTNFTTransfer`, `MultiESDTNFTTransfer` recognizers.
/// 3. Fallback: the plain metadata from step 1.
///
/// # Usage
/// ```rust
/// use txlens::config::DecoderConfig;
/// use txlens::decode::{DataFieldDecoder, TransactionToDecode};
///
/// let decoder = DataFieldDecoder::from_config(&DecoderConfig::default());
/// let metadata = decoder
///     .decode(&TransactionToDecode {
///         value: "1000".into(),
///         ..Default::default()
///     })
///     .unwrap();
/// assert_eq!(metadata.value.to_string(), "1000");
/// ```
#[derive(Clone)]
pub struct DataFieldDecoder {
    codec: Arc<dyn AddressCodec>,
    max_relay_depth: usize,
    logger: Logger,
}

impl DataFieldDecoder {
    pub fn new(codec: Arc<dyn AddressCodec>, max_relay_depth: usize) -> Self {
        Self {
            codec,
            max_relay_depth,
            logger: Logger::noop(),
        }
    }

    pub fn from_config(config: &DecoderConfig) -> Self {
        Self::new(Arc::new(config.codec()), config.max_relay_depth)
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Decode `tx` into metadata. Malformed input is an error; an
    /// unrecognized call shape is not.
    pub fn decode(&self, tx: &TransactionToDecode) -> Result<TransactionMetadata, DecodeError> {
        self.logger.in_scope(|| {
            let metadata = self.decode_call(tx, 0)?;

            for (name, recognize) in TRANSFER_RECOGNIZERS {
                if let Some(transfer) = recognize(&metadata, self.codec.as_ref())? {
                    tracing::debug!(
                        recognizer = name,
                        transfers = transfer.transfers.len(),
                        "decoded token transfer"
                    );
                    return Ok(transfer);
                }
            }

            tracing::trace!(function = ?metadata.function_name, "no transfer recognized");
            Ok(metadata)
        })
    }

    fn decode_call(
        &self,
        tx: &TransactionToDecode,
        depth: usize,
    ) -> Result<TransactionMetadata, DecodeError> {
        let value = parse_value(&tx.value)?;
        let mut metadata = TransactionMetadata::new(&tx.sender, &tx.receiver, value);

        if tx.data.is_empty() {
            return Ok(metadata);
        }

        let decoded = BASE64.decode(&tx.data)?;
        let text = String::from_utf8_lossy(&decoded);
        let mut components = text.split('@');
        let function = components.next().unwrap_or_default();
        let args: Vec<String> = components.map(str::to_string).collect();

        if args.iter().all(|arg| is_smart_contract_argument(arg)) {
            metadata.function_name = Some(function.to_string());
            metadata.function_args = Some(args);
        } else {
            tracing::trace!("data field arguments are not hex, treating as opaque data");
        }

        match unwrap_envelope(&metadata, self.codec.as_ref())? {
            Some(inner) => {
                if depth >= self.max_relay_depth {
                    return Err(DecodeError::MaxRelayDepthExceeded {
                        max: self.max_relay_depth,
                    });
                }
                tracing::debug!(
                    depth = depth + 1,
                    sender = %inner.sender,
                    receiver = %inner.receiver,
                    "unwrapped relayed transaction"
                );
                self.decode_call(&inner, depth + 1)
            }
            None => Ok(metadata),
        }
    }
}

/// Parse a decimal value; empty text means zero.
fn parse_value(value: &str) -> Result<BigUint, DecodeError> {
    if value.is_empty() {
        return Ok(BigUint::default());
    }
    parse_decimal(value).ok_or(DecodeError::ValueSet)
}

/// Strict decimal parse: ASCII digits with an optional leading `+`.
pub(crate) fn parse_decimal(text: &str) -> Option<BigUint> {
    let digits = text.strip_prefix('+').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
}
