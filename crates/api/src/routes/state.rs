//! Aggregated account state route.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tokio::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use substate_common::error::AppError;
use substate_common::types::AggregatedState;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/state",
        get(get_state)
            .head(method_not_allowed)
            .fallback(method_not_allowed),
    )
}

/// First `user` value in the query string; repeated keys are ignored.
fn first_user(pairs: &[(String, String)]) -> &str {
    pairs
        .iter()
        .find(|(key, _)| key == "user")
        .map(|(_, value)| value.trim())
        .unwrap_or_default()
}

/// GET /api/state?user=<account> — Subscription, balance, and recent events.
///
/// All three lookups share one deadline; any failure fails the whole request.
async fn get_state(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<AggregatedState>, AppError> {
    let user = first_user(&pairs);
    if user.is_empty() {
        return Err(AppError::Validation(
            "missing user query parameter".to_string(),
        ));
    }

    let deadline = Instant::now() + state.config.request_timeout;
    let span = tracing::info_span!("aggregate", request_id = %Uuid::new_v4(), user = %user);

    let aggregated = state
        .aggregator
        .aggregate(user, deadline)
        .instrument(span)
        .await?;

    Ok(Json(aggregated))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
