pub mod health;
pub mod state;

use axum::{Router, middleware};

use crate::middleware::cors::cors;
use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(state::router())
        .with_state(state)
        .layer(middleware::from_fn(cors))
}
