//! Token transfer recognizers.
//!
//! Each recognizer inspects the plain metadata of a call and either
//! rewrites it into a transfer description, declines (`Ok(None)`), or
//! fails on a malformed argument of a call it recognized.

use crate::address::AddressCodec;
use crate::decode::metadata::{
    TokenTransferProperties, TransactionMetadata, TransactionMetadataTransfer,
};
use crate::error::DecodeError;
use num_bigint::BigUint;

pub const ESDT_TRANSFER: &str = "ESDTTransfer";
pub const ESDT_NFT_TRANSFER: &str = "ESDTNFTTransfer";
pub const MULTI_ESDT_NFT_TRANSFER: &str = "MultiESDTNFTTransfer";

/// Signature shared by all transfer recognizers.
pub type TransferRecognizer =
    fn(&TransactionMetadata, &dyn AddressCodec) -> Result<Option<TransactionMetadata>, DecodeError>;

/// Recognizers in precedence order.
pub const TRANSFER_RECOGNIZERS: [(&str, TransferRecognizer); 3] = [
    (ESDT_TRANSFER, esdt_transfer),
    (ESDT_NFT_TRANSFER, nft_transfer),
    (MULTI_ESDT_NFT_TRANSFER, multi_transfer),
];

/// `ESDTTransfer@<token>@<value>[@<function>@<args>...]`
pub fn esdt_transfer(
    metadata: &TransactionMetadata,
    _codec: &dyn AddressCodec,
) -> Result<Option<TransactionMetadata>, DecodeError> {
    let Some(args) = call_args(metadata, ESDT_TRANSFER) else {
        return Ok(None);
    };
    require_args(ESDT_TRANSFER, args, 2)?;

    let token = hex_text(&args[0], "token identifier")?;
    let value = hex_amount(&args[1], "token value")?;

    let mut result = TransactionMetadata::new(&metadata.sender, &metadata.receiver, value.clone());
    set_inner_call(&mut result, &args[2..])?;
    result.transfers = vec![TransactionMetadataTransfer {
        value,
        properties: TokenTransferProperties::fungible(token),
    }];

    Ok(Some(result))
}

/// `ESDTNFTTransfer@<collection>@<nonce>@<value>@<receiver>[@<function>@<args>...]`,
/// sent to self.
pub fn nft_transfer(
    metadata: &TransactionMetadata,
    codec: &dyn AddressCodec,
) -> Result<Option<TransactionMetadata>, DecodeError> {
    if metadata.sender != metadata.receiver {
        return Ok(None);
    }
    let Some(args) = call_args(metadata, ESDT_NFT_TRANSFER) else {
        return Ok(None);
    };
    require_args(ESDT_NFT_TRANSFER, args, 4)?;
    require_address(&args[3], codec)?;

    let collection = hex_text(&args[0], "collection identifier")?;
    let nonce = &args[1];
    let value = hex_amount(&args[2], "token value")?;
    let receiver = codec.encode_hex(&args[3])?;

    let mut result = TransactionMetadata::new(&metadata.sender, receiver, value.clone());
    set_inner_call(&mut result, &args[4..])?;
    result.transfers = vec![TransactionMetadataTransfer {
        value,
        properties: TokenTransferProperties::non_fungible(collection, nonce),
    }];

    Ok(Some(result))
}

/// `MultiESDTNFTTransfer@<receiver>@<count>(@<token>@<nonce>@<value>)*[@<function>@<args>...]`,
/// sent to self.
pub fn multi_transfer(
    metadata: &TransactionMetadata,
    codec: &dyn AddressCodec,
) -> Result<Option<TransactionMetadata>, DecodeError> {
    if metadata.sender != metadata.receiver {
        return Ok(None);
    }
    let Some(args) = call_args(metadata, MULTI_ESDT_NFT_TRANSFER) else {
        return Ok(None);
    };
    require_args(MULTI_ESDT_NFT_TRANSFER, args, 3)?;
    require_address(&args[0], codec)?;

    let receiver = codec.encode_hex(&args[0])?;
    let count = u64::from_str_radix(&args[1], 16).map_err(|_| DecodeError::InvalidBigInt {
        field: "transfer count",
        value: args[1].clone(),
    })?;

    // Two leading arguments, then three per transfer.
    let end = usize::try_from(count)
        .ok()
        .and_then(|count| count.checked_mul(3))
        .and_then(|n| n.checked_add(2))
        .unwrap_or(usize::MAX);
    require_args(MULTI_ESDT_NFT_TRANSFER, args, end)?;

    let mut transfers = Vec::with_capacity(args[2..end].len() / 3);
    for group in args[2..end].chunks_exact(3) {
        let identifier = hex_text(&group[0], "transfer identifier")?;
        let nonce = &group[1];
        let value = hex_amount(&group[2], "transfer value")?;

        // An unparsable or out-of-range nonce is treated like a zero nonce: fungible.
        let properties = match i64::from_str_radix(nonce, 16) {
            Ok(n) if n > 0 => TokenTransferProperties::non_fungible(identifier, nonce),
            _ => TokenTransferProperties::fungible(identifier),
        };
        transfers.push(TransactionMetadataTransfer { value, properties });
    }

    let mut result = TransactionMetadata::new(&metadata.sender, receiver, BigUint::default());
    set_inner_call(&mut result, &args[end..])?;
    result.transfers = transfers;

    Ok(Some(result))
}

/// An argument accepted in a smart-contract call: even-length hex.
pub fn is_smart_contract_argument(arg: &str) -> bool {
    arg.len() % 2 == 0 && hex::decode(arg).is_ok()
}

fn call_args<'a>(metadata: &'a TransactionMetadata, function: &str) -> Option<&'a [String]> {
    metadata
        .call()
        .and_then(|(name, args)| (name == function).then_some(args))
}

fn require_args(
    function: &'static str,
    args: &[String],
    required: usize,
) -> Result<(), DecodeError> {
    if args.len() < required {
        return Err(DecodeError::NotEnoughArguments {
            function,
            required,
            found: args.len(),
        });
    }
    Ok(())
}

fn require_address(arg: &str, codec: &dyn AddressCodec) -> Result<(), DecodeError> {
    match hex::decode(arg) {
        Ok(bytes) if bytes.len() == codec.address_len() => Ok(()),
        _ => Err(DecodeError::InvalidAddress),
    }
}

/// Trailing `<function>@<args>...` after the transfer arguments.
fn set_inner_call(result: &mut TransactionMetadata, rest: &[String]) -> Result<(), DecodeError> {
    if let Some((function, args)) = rest.split_first() {
        result.function_name = Some(hex_text(function, "function name")?);
        result.function_args = Some(args.to_vec());
    }
    Ok(())
}

fn hex_text(arg: &str, field: &'static str) -> Result<String, DecodeError> {
    let bytes = hex::decode(arg).map_err(|source| DecodeError::InvalidHex { field, source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn hex_amount(arg: &str, field: &'static str) -> Result<BigUint, DecodeError> {
    BigUint::parse_bytes(arg.as_bytes(), 16).ok_or_else(|| DecodeError::InvalidBigInt {
        field,
        value: arg.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Bech32Codec;

    const SELF: &str = "erd1lkrrrn3ws9sp854kdpzer9f77eglqpeet3e3k3uxvqxw9p3eq6xqxj43r9";
    const CONTRACT_HEX: &str = "00000000000000000500df3bebe1afa10c40925e833c14a460e10a849f50a468";
    const CONTRACT: &str = "erd1qqqqqqqqqqqqqpgqmua7hcd05yxypyj7sv7pffrquy9gf86s535qxct34s";

    fn codec() -> Bech32Codec {
        Bech32Codec::new("erd", 32)
    }

    fn call(sender: &str, receiver: &str, function: &str, args: &[&str]) -> TransactionMetadata {
        let mut metadata = TransactionMetadata::new(sender, receiver, BigUint::default());
        metadata.function_name = Some(function.to_string());
        metadata.function_args = Some(args.iter().map(|a| a.to_string()).collect());
        metadata
    }

    #[test]
    fn test_is_smart_contract_argument() {
        assert!(is_smart_contract_argument(""));
        assert!(is_smart_contract_argument("0a"));
        assert!(is_smart_contract_argument("ABcd"));
        assert!(!is_smart_contract_argument("abc"));
        assert!(!is_smart_contract_argument("zz"));
    }

    #[test]
    fn test_esdt_with_inner_call() {
        let metadata = call(
            "erd1a",
            "erd1b",
            ESDT_TRANSFER,
            &["504c4154412d396261366333", "0a", "73776170", "01", ""],
        );
        let result = esdt_transfer(&metadata, &codec()).unwrap().unwrap();
        assert_eq!(result.function_name.as_deref(), Some("swap"));
        assert_eq!(
            result.function_args,
            Some(vec!["01".to_string(), String::new()])
        );
        assert_eq!(result.value, BigUint::from(10u32));
        assert_eq!(result.transfers[0].properties.token, "PLATA-9ba6c3");
    }

    #[test]
    fn test_esdt_missing_value_is_error() {
        let metadata = call("erd1a", "erd1b", ESDT_TRANSFER, &["504c415441"]);
        assert!(matches!(
            esdt_transfer(&metadata, &codec()),
            Err(DecodeError::NotEnoughArguments { required: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_esdt_empty_value_is_error() {
        let metadata = call("erd1a", "erd1b", ESDT_TRANSFER, &["504c415441", ""]);
        assert!(matches!(
            esdt_transfer(&metadata, &codec()),
            Err(DecodeError::InvalidBigInt { field: "token value", .. })
        ));
    }

    #[test]
    fn test_other_function_declines() {
        let metadata = call(SELF, SELF, "claimRewards", &[]);
        for (_, recognizer) in TRANSFER_RECOGNIZERS {
            assert!(recognizer(&metadata, &codec()).unwrap().is_none());
        }
    }

    #[test]
    fn test_nft_requires_self_call() {
        let metadata = call(
            SELF,
            CONTRACT,
            ESDT_NFT_TRANSFER,
            &["4c4b4d4558", "01", "01", CONTRACT_HEX],
        );
        assert!(nft_transfer(&metadata, &codec()).unwrap().is_none());
    }

    #[test]
    fn test_nft_transfer() {
        let metadata = call(
            SELF,
            SELF,
            ESDT_NFT_TRANSFER,
            &["4c4b4d45582d616162393130", "2fb4e9", "0f", CONTRACT_HEX],
        );
        let result = nft_transfer(&metadata, &codec()).unwrap().unwrap();
        assert_eq!(result.receiver, CONTRACT);
        assert_eq!(result.value, BigUint::from(15u32));
        assert!(result.function_name.is_none());
        assert_eq!(
            result.transfers[0].properties.identifier,
            "LKMEX-aab910-2fb4e9"
        );
    }

    #[test]
    fn test_nft_invalid_receiver_length() {
        let metadata = call(SELF, SELF, ESDT_NFT_TRANSFER, &["4c4b", "01", "01", "0011"]);
        assert!(matches!(
            nft_transfer(&metadata, &codec()),
            Err(DecodeError::InvalidAddress)
        ));
    }

    #[test]
    fn test_multi_requires_self_call() {
        let metadata = call(SELF, CONTRACT, MULTI_ESDT_NFT_TRANSFER, &[CONTRACT_HEX, "00", ""]);
        assert!(multi_transfer(&metadata, &codec()).unwrap().is_none());
    }

    #[test]
    fn test_multi_count_exceeds_arguments() {
        let metadata = call(
            SELF,
            SELF,
            MULTI_ESDT_NFT_TRANSFER,
            &[CONTRACT_HEX, "02", "5553444332", "00", "01"],
        );
        assert!(matches!(
            multi_transfer(&metadata, &codec()),
            Err(DecodeError::NotEnoughArguments { required: 8, found: 5, .. })
        ));
    }

    #[test]
    fn test_multi_absurd_count() {
        let metadata = call(
            SELF,
            SELF,
            MULTI_ESDT_NFT_TRANSFER,
            &[CONTRACT_HEX, "ffffffffffffffff", "00"],
        );
        assert!(matches!(
            multi_transfer(&metadata, &codec()),
            Err(DecodeError::NotEnoughArguments { .. })
        ));
    }

    #[test]
    fn test_multi_unparsable_nonce_is_fungible() {
        let metadata = call(
            SELF,
            SELF,
            MULTI_ESDT_NFT_TRANSFER,
            &[CONTRACT_HEX, "01", "55534443", "", "64"],
        );
        let result = multi_transfer(&metadata, &codec()).unwrap().unwrap();
        assert_eq!(result.value, BigUint::default());
        assert_eq!(result.transfers.len(), 1);
        assert_eq!(result.transfers[0].properties.token, "USDC");
        assert_eq!(result.transfers[0].value, BigUint::from(100u32));
        assert!(result.function_name.is_none());
    }

    #[test]
    fn test_multi_nonce_beyond_signed_range_is_fungible() {
        let metadata = call(
            SELF,
            SELF,
            MULTI_ESDT_NFT_TRANSFER,
            &[CONTRACT_HEX, "01", "55534443", "8000000000000000", "64"],
        );
        let result = multi_transfer(&metadata, &codec()).unwrap().unwrap();
        let properties = &result.transfers[0].properties;
        assert_eq!(properties.token, "USDC");
        assert!(properties.collection.is_empty());
        assert!(properties.identifier.is_empty());
    }
}
