//! Per-request aggregation of subscription, balance, and recent events.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::Instant;

use substate_common::config::AppConfig;
use substate_common::types::AggregatedState;
use substate_invoker::LedgerCli;

use crate::balance::fetch_balance;
use crate::error::FetchError;
use crate::events::fetch_recent_events;
use crate::subscription::fetch_subscription;

/// Builds an [`AggregatedState`] for one user.
///
/// Stateless between calls; cheap to clone.
#[derive(Clone)]
pub struct StateAggregator {
    cli: Arc<dyn LedgerCli>,
    config: Arc<AppConfig>,
}

impl StateAggregator {
    pub fn new(cli: Arc<dyn LedgerCli>, config: Arc<AppConfig>) -> Self {
        Self { cli, config }
    }

    /// Run the three fetches in sequence under one deadline.
    ///
    /// Fails on the first stage that fails; a missing subscription is not a
    /// failure and the remaining stages still run.
    pub async fn aggregate(&self, user: &str, deadline: Instant) -> Result<AggregatedState, FetchError> {
        let cli = self.cli.as_ref();
        let config = self.config.as_ref();
        let source = config.source_account.as_deref();

        let subscription = fetch_subscription(
            cli,
            deadline,
            &config.network,
            source,
            &config.subscription_contract_id,
            user,
        )
        .await?;

        let token_balance = fetch_balance(
            cli,
            deadline,
            &config.network,
            source,
            &config.payment_contract_id,
            user,
        )
        .await?;

        let recent_events = fetch_recent_events(
            cli,
            deadline,
            &config.network,
            &config.subscription_contract_id,
            &config.payment_contract_id,
        )
        .await?;

        tracing::info!(
            user = %user,
            subscribed = subscription.is_some(),
            events = recent_events.len(),
            "Aggregated state"
        );

        Ok(AggregatedState {
            user: user.to_string(),
            subscription,
            xlm_balance_stroops: token_balance.clone(),
            token_balance,
            recent_events,
            observed_at: Utc::now(),
            network: config.network.clone(),
            subscription_contract_id: config.subscription_contract_id.clone(),
            payment_contract_id: config.payment_contract_id.clone(),
        })
    }
}
