//! Substate API server binary entrypoint.

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use substate_common::config::AppConfig;
use substate_invoker::StellarCli;

use substate_api::routes::create_router;
use substate_api::state::AppState;

const DEFAULT_LOG_FILTER: &str =
    "substate_api=debug,substate_engine=debug,substate_invoker=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Substate API server...");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(
        network = %config.network,
        subscription_contract = %config.subscription_contract_id,
        payment_contract = %config.payment_contract_id,
        fixed_source = config.source_account.is_some(),
        stellar_bin = %config.stellar_bin,
        timeout_secs = config.request_timeout.as_secs(),
        "Configuration loaded"
    );

    let cli = Arc::new(StellarCli::new(config.stellar_bin.clone()));
    let addr = config.bind_addr;

    // Build application state
    let state = AppState::new(cli, config);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Substate API server stopped.");
    Ok(())
}

/// Plain text logs by default; `LOG_FORMAT=json` for structured output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.trim().eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal, stopping gracefully...");
}
