//! Shared application state for the Axum API server.

use std::sync::Arc;

use substate_common::config::AppConfig;
use substate_engine::StateAggregator;
use substate_invoker::LedgerCli;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: StateAggregator,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(cli: Arc<dyn LedgerCli>, config: AppConfig) -> Self {
        let config = Arc::new(config);
        Self {
            aggregator: StateAggregator::new(cli, config.clone()),
            config,
        }
    }
}
