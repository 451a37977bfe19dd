//! Conversion between bech32 account addresses and their raw bytes.

use crate::error::AddressError;
use bech32::{Bech32, Hrp};
use serde::Serialize;

/// Leading zero bytes that mark a smart-contract address.
const CONTRACT_ZERO_PREFIX: usize = 8;

/// Converts between the human-readable and raw forms of an address.
///
/// Both decoders take one of these as an injected dependency.
pub trait AddressCodec: Send + Sync {
    /// Length of a raw address in bytes.
    fn address_len(&self) -> usize;

    /// Encode raw address bytes to their human-readable form.
    fn encode(&self, bytes: &[u8]) -> Result<String, AddressError>;

    /// Decode a human-readable address to its raw bytes.
    fn decode(&self, address: &str) -> Result<Vec<u8>, AddressError>;

    /// Encode an address given as hex text.
    fn encode_hex(&self, hex_str: &str) -> Result<String, AddressError> {
        let bytes = hex::decode(hex_str)?;
        self.encode(&bytes)
    }
}

/// Bech32 codec with a fixed prefix and address length.
#[derive(Debug, Clone)]
pub struct Bech32Codec {
    prefix: String,
    len: usize,
}

impl Bech32Codec {
    pub fn new(prefix: &str, len: usize) -> Self {
        Self {
            prefix: prefix.to_lowercase(),
            len,
        }
    }

    fn check_len(&self, found: usize) -> Result<(), AddressError> {
        if found != self.len {
            return Err(AddressError::InvalidLength {
                expected: self.len,
                found,
            });
        }
        Ok(())
    }
}

impl AddressCodec for Bech32Codec {
    fn address_len(&self) -> usize {
        self.len
    }

    fn encode(&self, bytes: &[u8]) -> Result<String, AddressError> {
        self.check_len(bytes.len())?;

        let hrp = Hrp::parse(&self.prefix).map_err(|e| AddressError::Bech32(e.to_string()))?;
        bech32::encode::<Bech32>(hrp, bytes).map_err(|e| AddressError::Bech32(e.to_string()))
    }

    fn decode(&self, address: &str) -> Result<Vec<u8>, AddressError> {
        let (hrp, bytes) =
            bech32::decode(address).map_err(|e| AddressError::Bech32(e.to_string()))?;

        let found = hrp.to_string().to_lowercase();
        if found != self.prefix {
            return Err(AddressError::WrongPrefix {
                expected: self.prefix.clone(),
                found,
            });
        }

        self.check_len(bytes.len())?;
        Ok(bytes)
    }
}

/// Both forms of one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressForms {
    pub bech32: String,
    pub hex: String,
    pub is_contract: bool,
}

impl AddressForms {
    /// Resolve an address given either as bech32 or as raw hex.
    pub fn resolve(codec: &dyn AddressCodec, input: &str) -> Result<Self, AddressError> {
        let input = input.trim();
        let hex_input = input.strip_prefix("0x").unwrap_or(input);

        let bytes = if hex_input.len() == codec.address_len() * 2
            && hex_input.chars().all(|c| c.is_ascii_hexdigit())
        {
            hex::decode(hex_input)?
        } else {
            codec.decode(input)?
        };

        Ok(Self {
            bech32: codec.encode(&bytes)?,
            hex: hex::encode(&bytes),
            is_contract: is_contract_address(&bytes),
        })
    }
}

/// Contract addresses start with eight zero bytes.
pub fn is_contract_address(bytes: &[u8]) -> bool {
    bytes.len() > CONTRACT_ZERO_PREFIX && bytes[..CONTRACT_ZERO_PREFIX].iter().all(|b| *b == 0)
}
