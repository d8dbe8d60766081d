//! Token balance lookup via the payment contract's `balance` function.
//!
//! Token contracts in the wild disagree on what the account parameter of
//! `balance` is called, and the CLI exposes it as a named flag. Rather than
//! sniff the contract interface we try each known spelling in a fixed order
//! and keep the first that the CLI accepts.

use tokio::time::Instant;

use substate_decoders::normalize_balance;
use substate_invoker::{InvokeError, LedgerCli};

use crate::contract::read_call;
use crate::error::FetchError;

const CONTEXT: &str = "fetch token balance";

/// Spelling of the account parameter of `balance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceCandidate {
    /// `balance --id <user>` (Stellar Asset Contract / SEP-41)
    Id,
    /// `balance --user <user>`
    User,
    /// `balance --account <user>`
    Account,
}

impl BalanceCandidate {
    /// Attempt order. Stable: callers may rely on `Id` being tried first.
    pub const ORDER: [BalanceCandidate; 3] = [
        BalanceCandidate::Id,
        BalanceCandidate::User,
        BalanceCandidate::Account,
    ];

    pub fn flag(self) -> &'static str {
        match self {
            BalanceCandidate::Id => "--id",
            BalanceCandidate::User => "--user",
            BalanceCandidate::Account => "--account",
        }
    }
}

/// Fetch the user's token balance as a canonical decimal string.
///
/// Candidates from [`BalanceCandidate::ORDER`] are invoked one at a time and
/// the first success wins. If every candidate fails, the error carries the
/// diagnostic of the last attempt; all attempts are logged. A deadline hit
/// aborts the remaining candidates.
pub async fn fetch_balance(
    cli: &dyn LedgerCli,
    deadline: Instant,
    network: &str,
    source: Option<&str>,
    contract_id: &str,
    user: &str,
) -> Result<String, FetchError> {
    let base = read_call(network, source, contract_id, user).arg("balance");
    let mut failures: Vec<(BalanceCandidate, String)> = Vec::new();

    for candidate in BalanceCandidate::ORDER {
        let invocation = base.clone().flag(candidate.flag(), user);

        match cli.run(&invocation, deadline).await {
            Ok(output) => {
                tracing::debug!(
                    flag = candidate.flag(),
                    attempts = failures.len() + 1,
                    "Token balance resolved"
                );
                return Ok(normalize_balance(&output));
            }
            Err(InvokeError::DeadlineExceeded) => {
                return Err(FetchError::DeadlineExceeded { context: CONTEXT });
            }
            Err(InvokeError::Failed(message)) => {
                tracing::debug!(flag = candidate.flag(), error = %message, "Balance candidate rejected");
                failures.push((candidate, message));
            }
        }
    }

    tracing::warn!(
        contract_id,
        attempts = ?failures,
        "All balance parameter candidates failed"
    );

    let message = failures.pop().map(|(_, m)| m).unwrap_or_default();
    Err(FetchError::Upstream {
        context: CONTEXT,
        message,
    })
}
