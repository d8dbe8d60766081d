//! HTTP surface for the subscription state aggregator.
//!
//! Endpoints:
//! - GET /healthz — liveness probe
//! - GET /api/state?user=<account> — subscription, token balance, and recent
//!   contract events for one account

pub mod middleware;
pub mod routes;
pub mod state;
