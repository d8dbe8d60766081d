//! Ledger fetchers and the per-request aggregation that combines them.

pub mod aggregator;
pub mod balance;
pub mod contract;
pub mod error;
pub mod events;
pub mod subscription;

pub use aggregator::StateAggregator;
pub use error::FetchError;
