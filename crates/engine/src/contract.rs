//! Read-only `contract invoke` calls.

use substate_invoker::Invocation;

/// Source-account arguments for a simulated (never submitted) contract call.
///
/// A configured source account wins; otherwise the user simulates as
/// themselves; with neither, the CLI falls back to its own default identity.
pub fn source_args(source: Option<&str>, user: &str) -> Vec<String> {
    if let Some(source) = source.map(str::trim).filter(|s| !s.is_empty()) {
        return vec!["--source".to_string(), source.to_string()];
    }
    let user = user.trim();
    if !user.is_empty() {
        return vec!["--source-account".to_string(), user.to_string()];
    }
    Vec::new()
}

/// `contract invoke ... --send=no --` up to (not including) the function name.
pub fn read_call(network: &str, source: Option<&str>, contract_id: &str, user: &str) -> Invocation {
    Invocation::new(["contract", "invoke"])
        .flag("--network", network)
        .extend(source_args(source, user))
        .flag("--id", contract_id)
        .arg("--send=no")
        .arg("--")
}
