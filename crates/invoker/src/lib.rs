//! Boundary to the `stellar` command-line client.
//!
//! All ledger access goes through [`LedgerCli`], a one-method trait that runs
//! a CLI invocation under a deadline and hands back its standard output.
//! [`StellarCli`] is the production implementation; the `scripted` feature
//! adds a queue-driven fake for tests.

pub mod invocation;
pub mod process;
#[cfg(feature = "scripted")]
pub mod scripted;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;

pub use invocation::Invocation;
pub use process::StellarCli;

/// Failure of a single CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// The process ran (or could not be started) and failed.
    /// Carries the single most useful diagnostic line.
    #[error("{0}")]
    Failed(String),

    /// The deadline passed before the process exited; the process was killed.
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// Runs `stellar` CLI invocations.
///
/// Implementations must stop waiting at `deadline`, and must not leave the
/// child running when the returned future is dropped.
#[async_trait]
pub trait LedgerCli: Send + Sync {
    /// Run one invocation and return its trimmed standard output.
    async fn run(&self, invocation: &Invocation, deadline: Instant) -> Result<String, InvokeError>;
}
