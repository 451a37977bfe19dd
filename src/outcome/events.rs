//! Event lookups shared by the outcome recognizers.

use crate::error::ParseError;
use crate::outcome::{ApiLogs, Event};

/// Emitted when a transaction completes; carries no outcome data.
pub const COMPLETED_TX_EVENT: &str = "completedTxEvent";
/// Emitted when a contract aborts with an error.
pub const SIGNAL_ERROR: &str = "signalError";
/// Emitted when a contract writes its return data to the log.
pub const WRITE_LOG: &str = "writeLog";
/// Topic prefix of the warning written when a call was given too much gas.
pub const TOO_MUCH_GAS: &str = "@too much gas";

/// Find the single event with `identifier` that satisfies `predicate`.
///
/// Returns `Ok(None)` when no event matches and an error when more than one
/// does.
pub fn find_single_or_none<'a>(
    logs: Option<&'a ApiLogs>,
    identifier: &str,
    predicate: impl Fn(&Event) -> bool,
) -> Result<Option<&'a Event>, ParseError> {
    let Some(logs) = logs else {
        return Ok(None);
    };

    let mut matching = logs
        .events
        .iter()
        .filter(|event| event.identifier == identifier && predicate(*event));

    let found = matching.next();
    if matching.next().is_some() {
        return Err(ParseError::FoundMoreThanOneEvent {
            identifier: identifier.to_string(),
        });
    }
    Ok(found)
}

/// First topic satisfying `predicate`.
pub fn find_topic<'a>(event: &'a Event, predicate: impl Fn(&[u8]) -> bool) -> Option<&'a [u8]> {
    event
        .topics
        .iter()
        .map(Vec::as_slice)
        .find(|topic| predicate(*topic))
}

/// The last topic as text.
pub fn last_topic(event: &Event) -> Option<String> {
    event
        .topics
        .last()
        .map(|topic| String::from_utf8_lossy(topic).into_owned())
}
