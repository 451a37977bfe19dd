//! Decoder configuration.

use crate::address::Bech32Codec;
use serde::Deserialize;

/// Human-readable prefix of mainnet account addresses.
pub const DEFAULT_ADDRESS_PREFIX: &str = "erd";

/// Length in bytes of a raw account address.
pub const DEFAULT_ADDRESS_LEN: usize = 32;

/// How many relayed envelopes may be nested before decoding gives up.
pub const DEFAULT_MAX_RELAY_DEPTH: usize = 8;

/// Settings shared by the data-field decoder and the outcome parser.
///
/// Services embedding the decoders can load this from their own
/// configuration files; the CLI fills it from flags and environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecoderConfig {
    /// Bech32 human-readable part used for encoding addresses.
    pub address_prefix: String,
    /// Expected raw address length.
    pub address_len: usize,
    /// Upper bound on nested relayed-transaction unwrapping.
    pub max_relay_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            address_prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
            address_len: DEFAULT_ADDRESS_LEN,
            max_relay_depth: DEFAULT_MAX_RELAY_DEPTH,
        }
    }
}

impl DecoderConfig {
    /// Build the address codec matching this configuration.
    pub fn codec(&self) -> Bech32Codec {
        Bech32Codec::new(&self.address_prefix, self.address_len)
    }
}
