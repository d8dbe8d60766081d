//! Recent contract events over a fixed lookback window.

use serde::Deserialize;
use tokio::time::Instant;

use substate_common::types::EventRecord;
use substate_decoders::parse_event_stream;
use substate_invoker::{Invocation, LedgerCli};

use crate::error::FetchError;

/// Number of ledgers scanned back from the latest one (~17 minutes on Stellar).
pub const LOOKBACK_LEDGERS: u64 = 200;

/// Maximum number of events requested from the CLI.
pub const EVENT_LIMIT: u32 = 30;

/// What the CLI prints instead of JSON when the window is empty.
const NO_EVENTS: &str = "No events";

#[derive(Debug, Deserialize)]
struct LatestLedger {
    #[serde(default)]
    sequence: u64,
}

/// First ledger of the lookback window: `max(1, latest - LOOKBACK_LEDGERS)`.
pub fn lookback_start(latest_sequence: u64) -> u64 {
    latest_sequence.saturating_sub(LOOKBACK_LEDGERS).max(1)
}

/// Fetch up to [`EVENT_LIMIT`] events emitted by either contract within the
/// lookback window, in the order the CLI reports them.
pub async fn fetch_recent_events(
    cli: &dyn LedgerCli,
    deadline: Instant,
    network: &str,
    subscription_contract_id: &str,
    token_contract_id: &str,
) -> Result<Vec<EventRecord>, FetchError> {
    let latest_call = Invocation::new(["ledger", "latest"])
        .flag("--network", network)
        .flag("--output", "json");

    let latest_output = cli
        .run(&latest_call, deadline)
        .await
        .map_err(|e| FetchError::invoke("fetch latest ledger", e))?;

    let latest: LatestLedger = serde_json::from_str(&latest_output)
        .map_err(|e| FetchError::parse("parse latest ledger", e))?;

    let start = lookback_start(latest.sequence);
    tracing::debug!(
        latest = latest.sequence,
        start_ledger = start,
        "Scanning event window"
    );

    let events_call = Invocation::new(["events"])
        .flag("--network", network)
        .flag("--output", "json")
        .flag("--count", EVENT_LIMIT.to_string())
        .flag("--start-ledger", start.to_string())
        .flag("--id", subscription_contract_id)
        .flag("--id", token_contract_id);

    let output = cli
        .run(&events_call, deadline)
        .await
        .map_err(|e| FetchError::invoke("fetch events", e))?;

    let raw = output.trim();
    if raw.is_empty() || raw == NO_EVENTS {
        return Ok(Vec::new());
    }

    Ok(parse_event_stream(raw)?)
}
