//! Recovers a smart-contract execution outcome from results and logs.

use crate::address::AddressCodec;
use crate::config::DecoderConfig;
use crate::error::ParseError;
use crate::logging::Logger;
use crate::outcome::events::{
    SIGNAL_ERROR, TOO_MUCH_GAS, WRITE_LOG, find_single_or_none, find_topic, last_topic,
};
use crate::outcome::slicing::slice_data_field_in_parts;
use crate::outcome::{ApiTransactionResult, Event, ResultOutcome, ReturnCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::sync::Arc;

type OutcomeRecognizer =
    fn(&OutcomeParser, &ApiTransactionResult) -> Result<Option<ResultOutcome>, ParseError>;

/// Runs an ordered chain of recognizers over an executed transaction.
///
/// The first recognizer that produces an outcome wins. When none does, the
/// outcome cannot be determined from the available data and `parse`
/// returns `Ok(None)`.
#[derive(Clone)]
pub struct OutcomeParser {
    codec: Arc<dyn AddressCodec>,
    logger: Logger,
}

impl OutcomeParser {
    const RECOGNIZERS: [(&'static str, OutcomeRecognizer); 7] = [
        ("simple move balance", Self::on_simple_move_balance),
        ("invalid transaction", Self::on_invalid_transaction),
        ("easily found result", Self::on_easily_found_result_with_data),
        ("signal error", Self::on_signal_error),
        ("too much gas", Self::on_too_much_gas),
        ("write log to sender", Self::on_write_log_with_sender),
        ("fallback", Self::on_fallback),
    ];

    pub fn new(codec: Arc<dyn AddressCodec>) -> Self {
        Self {
            codec,
            logger: Logger::noop(),
        }
    }

    pub fn from_config(config: &DecoderConfig) -> Self {
        Self::new(Arc::new(config.codec()))
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn parse(&self, tx: &ApiTransactionResult) -> Result<Option<ResultOutcome>, ParseError> {
        self.logger.in_scope(|| {
            for (name, recognize) in Self::RECOGNIZERS {
                if let Some(outcome) = recognize(self, tx)? {
                    tracing::debug!(
                        recognizer = name,
                        hash = %tx.hash,
                        return_code = %outcome.return_code,
                        "result outcome recognized"
                    );
                    return Ok(Some(outcome));
                }
                tracing::trace!(recognizer = name, "declined");
            }

            tracing::debug!(hash = %tx.hash, "outcome could not be determined");
            Ok(None)
        })
    }

    /// No results and no events: a plain value transfer.
    pub fn on_simple_move_balance(
        &self,
        tx: &ApiTransactionResult,
    ) -> Result<Option<ResultOutcome>, ParseError> {
        let no_events = tx.logs.as_ref().is_none_or(|logs| logs.events.is_empty());
        if tx.smart_contract_results.is_empty() && no_events {
            return Ok(Some(ResultOutcome::default()));
        }
        Ok(None)
    }

    /// Invalid transactions explain themselves in the receipt.
    pub fn on_invalid_transaction(
        &self,
        tx: &ApiTransactionResult,
    ) -> Result<Option<ResultOutcome>, ParseError> {
        if tx.status != "invalid" {
            return Ok(None);
        }
        let Some(receipt) = tx.receipt.as_ref().filter(|r| !r.data.is_empty()) else {
            return Ok(None);
        };

        Ok(Some(ResultOutcome::new(
            ReturnCode::OutOfFunds,
            receipt.data.clone(),
            Vec::new(),
        )))
    }

    pub fn on_easily_found_result_with_data(
        &self,
        tx: &ApiTransactionResult,
    ) -> Result<Option<ResultOutcome>, ParseError> {
        let Some(result) = tx
            .smart_contract_results
            .iter()
            .find(|scr| scr.nonce != 0 && scr.data.starts_with('@'))
        else {
            return Ok(None);
        };

        let parts = slice_data_field_in_parts(&result.data)?;
        let message = if result.return_message.is_empty() {
            parts.return_code.to_string()
        } else {
            result.return_message.clone()
        };
        Ok(Some(ResultOutcome::new(parts.return_code, message, parts.values)))
    }

    pub fn on_signal_error(
        &self,
        tx: &ApiTransactionResult,
    ) -> Result<Option<ResultOutcome>, ParseError> {
        match find_single_or_none(tx.logs.as_ref(), SIGNAL_ERROR, |_| true)? {
            Some(event) => outcome_from_event(event, last_topic(event)).map(Some),
            None => Ok(None),
        }
    }

    pub fn on_too_much_gas(
        &self,
        tx: &ApiTransactionResult,
    ) -> Result<Option<ResultOutcome>, ParseError> {
        let event = find_single_or_none(tx.logs.as_ref(), WRITE_LOG, |event| {
            find_topic(event, |topic| topic.starts_with(TOO_MUCH_GAS.as_bytes())).is_some()
        })?;

        match event {
            Some(event) => outcome_from_event(event, last_topic(event)).map(Some),
            None => Ok(None),
        }
    }

    /// A `writeLog` event addressed back to the sender carries the result.
    pub fn on_write_log_with_sender(
        &self,
        tx: &ApiTransactionResult,
    ) -> Result<Option<ResultOutcome>, ParseError> {
        if tx.sender.is_empty() {
            return Ok(None);
        }
        let sender_bytes = self.codec.decode(&tx.sender).ok();

        let event = find_single_or_none(tx.logs.as_ref(), WRITE_LOG, |event| {
            find_topic(event, |topic| {
                topic_is_address(topic, &tx.sender, sender_bytes.as_deref())
            })
            .is_some()
        })?;

        match event {
            Some(event) => outcome_from_event(event, None).map(Some),
            None => Ok(None),
        }
    }

    /// Look for the result in the logs attached to the smart-contract
    /// results.
    ///
    /// Only the first result is examined: when its logs hold no matching
    /// event the search ends, even if a later result would match.
    pub fn on_fallback(
        &self,
        tx: &ApiTransactionResult,
    ) -> Result<Option<ResultOutcome>, ParseError> {
        let Some(receiver) = tx.receivers.first() else {
            return Ok(None);
        };
        let Some(result) = tx.smart_contract_results.first() else {
            return Ok(None);
        };

        let event = find_single_or_none(result.logs.as_ref(), WRITE_LOG, |event| {
            event.address == tx.sender && first_topic_is(event, receiver)
        })?;

        match event {
            Some(event) => outcome_from_event(event, None).map(Some),
            None => {
                tracing::trace!(result = %result.hash, "no matching event, giving up");
                Ok(None)
            }
        }
    }
}

/// Slice an event's data; the message defaults to the return code text.
fn outcome_from_event(event: &Event, message: Option<String>) -> Result<ResultOutcome, ParseError> {
    let parts = slice_data_field_in_parts(&String::from_utf8_lossy(&event.data))?;
    let message = message.unwrap_or_else(|| parts.return_code.to_string());
    Ok(ResultOutcome::new(parts.return_code, message, parts.values))
}

/// Topics name addresses either as raw bytes or as base64 text of the raw
/// bytes or of the bech32 form.
fn topic_is_address(topic: &[u8], address: &str, raw: Option<&[u8]>) -> bool {
    if raw.is_some_and(|raw| topic == raw) {
        return true;
    }
    match BASE64.decode(topic) {
        Ok(decoded) => raw.is_some_and(|raw| decoded == raw) || decoded == address.as_bytes(),
        Err(_) => false,
    }
}

/// The first topic holds the receiver as hex text.
fn first_topic_is(event: &Event, receiver: &str) -> bool {
    let Some(topic) = event.topics.first() else {
        return false;
    };
    hex::decode(topic).is_ok_and(|decoded| decoded == receiver.as_bytes())
}
