//! Executed-transaction records and the recovered outcome.

use crate::encoding::{base64_bytes, base64_list, nullable, text_values};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A fully executed transaction as returned by the node API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTransactionResult {
    #[serde(default, deserialize_with = "nullable")]
    pub hash: String,
    #[serde(default, deserialize_with = "nullable")]
    pub sender: String,
    #[serde(default, deserialize_with = "nullable")]
    pub receiver: String,
    #[serde(default, deserialize_with = "nullable")]
    pub receivers: Vec<String>,
    /// Execution status, e.g. `success`, `fail` or `invalid`.
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default)]
    pub receipt: Option<ApiReceipt>,
    #[serde(default, deserialize_with = "nullable")]
    pub smart_contract_results: Vec<ApiSmartContractResult>,
    #[serde(default)]
    pub logs: Option<ApiLogs>,
}

impl ApiTransactionResult {
    /// Fill `receivers` from `receiver` when the node left it empty.
    pub fn normalize_receivers(&mut self) {
        if self.receivers.is_empty() && !self.receiver.is_empty() {
            self.receivers.push(self.receiver.clone());
        }
    }
}

/// Receipt attached to transactions that paid fees without executing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiReceipt {
    #[serde(default, deserialize_with = "nullable")]
    pub data: String,
}

/// A smart-contract result produced during execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSmartContractResult {
    #[serde(default, deserialize_with = "nullable")]
    pub hash: String,
    /// Zero marks results that never carry return data.
    #[serde(default)]
    pub nonce: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub data: String,
    #[serde(default, deserialize_with = "nullable")]
    pub return_message: String,
    #[serde(default)]
    pub logs: Option<ApiLogs>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiLogs {
    #[serde(default, deserialize_with = "nullable")]
    pub address: String,
    #[serde(default, deserialize_with = "nullable")]
    pub events: Vec<Event>,
}

/// A log event. Topics and data are raw bytes; on the wire they are base64.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Event {
    #[serde(default, deserialize_with = "nullable")]
    pub identifier: String,
    #[serde(default, deserialize_with = "nullable")]
    pub address: String,
    #[serde(default, with = "base64_list")]
    pub topics: Vec<Vec<u8>>,
    #[serde(default, with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Return codes reported by the virtual machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ReturnCode {
    /// No code; plain transfers that never reached a contract.
    #[default]
    None,
    Ok,
    FunctionNotFound,
    FunctionWrongSignature,
    ContractNotFound,
    UserError,
    OutOfGas,
    AccountCollision,
    OutOfFunds,
    CallStackOverflow,
    ContractInvalid,
    ExecutionFailed,
    UpgradeFailed,
    SimulateFailed,
    /// Any code text outside the known vocabulary.
    Other(String),
}

const KNOWN_CODES: [(ReturnCode, &str); 14] = [
    (ReturnCode::None, ""),
    (ReturnCode::Ok, "ok"),
    (ReturnCode::FunctionNotFound, "function not found"),
    (ReturnCode::FunctionWrongSignature, "wrong signature for function"),
    (ReturnCode::ContractNotFound, "contract not found"),
    (ReturnCode::UserError, "user error"),
    (ReturnCode::OutOfGas, "out of gas"),
    (ReturnCode::AccountCollision, "account collision"),
    (ReturnCode::OutOfFunds, "out of funds"),
    (ReturnCode::CallStackOverflow, "call stack overflow"),
    (ReturnCode::ContractInvalid, "contract invalid"),
    (ReturnCode::ExecutionFailed, "execution failed"),
    (ReturnCode::UpgradeFailed, "upgrade failed"),
    (ReturnCode::SimulateFailed, "simulate failed"),
];

impl ReturnCode {
    pub fn as_str(&self) -> &str {
        if let ReturnCode::Other(text) = self {
            return text;
        }
        KNOWN_CODES
            .iter()
            .find(|(code, _)| code == self)
            .map(|(_, text)| *text)
            .unwrap_or_default()
    }

    /// Map a decoded code text onto the vocabulary.
    pub fn from_text(text: &str) -> Self {
        KNOWN_CODES
            .iter()
            .find(|(_, known)| *known == text)
            .map(|(code, _)| code.clone())
            .unwrap_or_else(|| ReturnCode::Other(text.to_string()))
    }

    /// `true` for codes that denote a successful execution.
    pub fn is_success(&self) -> bool {
        matches!(self, ReturnCode::None | ReturnCode::Ok)
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReturnCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReturnCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::from_text(&text))
    }
}

/// The outcome of a smart-contract execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultOutcome {
    pub return_code: ReturnCode,
    pub return_message: String,
    #[serde(serialize_with = "text_values")]
    pub values: Vec<Vec<u8>>,
}

impl ResultOutcome {
    pub fn new(
        return_code: ReturnCode,
        return_message: impl Into<String>,
        values: Vec<Vec<u8>>,
    ) -> Self {
        Self {
            return_code,
            return_message: return_message.into(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_code_text() {
        assert_eq!(ReturnCode::None.as_str(), "");
        assert_eq!(ReturnCode::UserError.as_str(), "user error");
        assert_eq!(ReturnCode::from_text("out of gas"), ReturnCode::OutOfGas);
        assert_eq!(
            ReturnCode::from_text("sending value to non payable contract"),
            ReturnCode::Other("sending value to non payable contract".into())
        );
        assert_eq!(ReturnCode::Other("custom".into()).to_string(), "custom");
    }

    #[test]
    fn test_every_known_code_round_trips() {
        for (code, text) in KNOWN_CODES.iter() {
            assert_eq!(code.as_str(), *text);
            assert_eq!(&ReturnCode::from_text(text), code);
        }
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = ResultOutcome::new(ReturnCode::Ok, "foobar", vec![b"03".to_vec()]);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"returnCode": "ok", "returnMessage": "foobar", "values": ["03"]})
        );
    }

    #[test]
    fn test_transaction_result_from_node_json() {
        let json = r#"{
            "hash": "a1b2",
            "sender": "erd1sender",
            "receiver": "erd1receiver",
            "status": "success",
            "smartContractResults": [
                {"nonce": 42, "data": "@6f6b@03", "returnMessage": "foobar", "logs": null}
            ],
            "logs": {
                "address": "erd1receiver",
                "events": [
                    {"identifier": "writeLog", "address": "erd1receiver", "topics": ["QHRvbyBtdWNo"], "data": "QDZmNmI="}
                ]
            }
        }"#;

        let mut tx: ApiTransactionResult = serde_json::from_str(json).unwrap();
        assert!(tx.receivers.is_empty());
        tx.normalize_receivers();
        assert_eq!(tx.receivers, vec!["erd1receiver".to_string()]);

        assert_eq!(tx.smart_contract_results[0].nonce, 42);
        assert_eq!(tx.smart_contract_results[0].return_message, "foobar");

        let event = &tx.logs.as_ref().unwrap().events[0];
        assert_eq!(event.topics, vec![b"@too much".to_vec()]);
        assert_eq!(event.data, b"@6f6b");
    }

    #[test]
    fn test_null_collections() {
        let tx: ApiTransactionResult =
            serde_json::from_str(r#"{"smartContractResults": null, "receivers": null, "logs": null}"#)
                .unwrap();
        assert!(tx.smart_contract_results.is_empty());
        assert!(tx.receivers.is_empty());
        assert!(tx.logs.is_none());
    }
}
