//! Transaction data-field decoding.

mod data_field;
mod metadata;
mod relayed;
mod transfers;

pub use data_field::DataFieldDecoder;
pub use metadata::{
    TokenTransferProperties, TransactionMetadata, TransactionMetadataTransfer, TransactionToDecode,
};
pub use relayed::{InnerTransaction, RELAYED_TX_V1, RELAYED_TX_V2, unwrap_envelope};
pub use transfers::{
    ESDT_NFT_TRANSFER, ESDT_TRANSFER, MULTI_ESDT_NFT_TRANSFER, TRANSFER_RECOGNIZERS,
    TransferRecognizer, esdt_transfer, is_smart_contract_argument, multi_transfer, nft_transfer,
};
