use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;

/// A single contract event exactly as the CLI emitted it.
///
/// The service never looks inside events; it only guarantees each one is
/// valid JSON and forwards it unchanged.
pub type EventRecord = Box<RawValue>;

/// A user's on-chain subscription, as returned by `get_subscription`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub plan_id: u32,
    /// Expiry as a ledger timestamp (UNIX seconds)
    pub expires_at: u64,
}

/// Aggregated view of a user's subscription, balance, and recent events.
///
/// Field names are part of the public response contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedState {
    pub user: String,
    pub subscription: Option<SubscriptionRecord>,
    pub token_balance: String,
    /// Legacy alias of `token_balance`; always carries the same value.
    #[serde(rename = "xlmBalanceStroops")]
    pub xlm_balance_stroops: String,
    pub recent_events: Vec<EventRecord>,
    #[serde(serialize_with = "rfc3339_seconds")]
    pub observed_at: DateTime<Utc>,
    pub network: String,
    pub subscription_contract_id: String,
    pub payment_contract_id: String,
}

fn rfc3339_seconds<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true))
}
