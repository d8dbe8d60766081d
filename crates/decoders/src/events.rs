use serde_json::Deserializer;
use serde_json::value::RawValue;
use thiserror::Error;

use substate_common::types::EventRecord;

/// The event listing was not a clean sequence of JSON documents.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("event {index}: {source}")]
    Malformed {
        /// Zero-based position of the document that failed to decode
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Split a concatenated-JSON event listing into individual events.
///
/// Documents may be separated by any whitespace (the CLI emits one per
/// line). Literal `null` documents are skipped. Decoding stops at a clean
/// end of input; anything that does not decode as a complete JSON value,
/// including trailing text after valid events, is an error.
pub fn parse_event_stream(raw: &str) -> Result<Vec<EventRecord>, StreamError> {
    let mut events = Vec::with_capacity(8);

    let stream = Deserializer::from_str(raw).into_iter::<Box<RawValue>>();
    for (index, item) in stream.enumerate() {
        let event = item.map_err(|source| StreamError::Malformed { index, source })?;
        if event.get() == "null" {
            continue;
        }
        events.push(event);
    }

    tracing::trace!(count = events.len(), "Parsed event stream");
    Ok(events)
}
