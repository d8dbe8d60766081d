//! Health check endpoint.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(health_check))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}
