//! Subscription lookup via the subscription contract's `get_subscription`.

use serde_json::{Map, Value};
use tokio::time::Instant;

use substate_common::types::SubscriptionRecord;
use substate_decoders::decode_u64;
use substate_invoker::LedgerCli;

use crate::contract::read_call;
use crate::error::FetchError;

/// Fetch the user's subscription. `Ok(None)` means the contract has no
/// record for the user, which is not an error.
pub async fn fetch_subscription(
    cli: &dyn LedgerCli,
    deadline: Instant,
    network: &str,
    source: Option<&str>,
    contract_id: &str,
    user: &str,
) -> Result<Option<SubscriptionRecord>, FetchError> {
    let invocation = read_call(network, source, contract_id, user)
        .arg("get_subscription")
        .flag("--user", user);

    let output = cli
        .run(&invocation, deadline)
        .await
        .map_err(|e| FetchError::invoke("fetch subscription", e))?;

    parse_subscription(&output)
}

/// Interpret `get_subscription` output: empty or `null` is "no subscription",
/// anything else must be an object with `plan_id` and `expires_at`.
pub fn parse_subscription(raw: &str) -> Result<Option<SubscriptionRecord>, FetchError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "null" {
        return Ok(None);
    }

    let parsed: Map<String, Value> = serde_json::from_str(raw)
        .map_err(|e| FetchError::parse("parse subscription payload", e))?;

    let plan_id =
        decode_u64(parsed.get("plan_id")).map_err(|e| FetchError::parse("parse plan_id", e))?;
    let plan_id = u32::try_from(plan_id).map_err(|_| {
        FetchError::parse("parse plan_id", format!("{} is out of range for u32", plan_id))
    })?;
    let expires_at = decode_u64(parsed.get("expires_at"))
        .map_err(|e| FetchError::parse("parse expires_at", e))?;

    Ok(Some(SubscriptionRecord {
        plan_id,
        expires_at,
    }))
}
