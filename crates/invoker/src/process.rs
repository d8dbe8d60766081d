use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::Instant;

use crate::{Invocation, InvokeError, LedgerCli};

/// Runs invocations against a real `stellar` binary.
#[derive(Debug, Clone)]
pub struct StellarCli {
    binary: String,
}

impl StellarCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for StellarCli {
    fn default() -> Self {
        Self::new("stellar")
    }
}

#[async_trait]
impl LedgerCli for StellarCli {
    async fn run(&self, invocation: &Invocation, deadline: Instant) -> Result<String, InvokeError> {
        if Instant::now() >= deadline {
            return Err(InvokeError::DeadlineExceeded);
        }

        let started = Instant::now();
        let mut cmd = Command::new(&self.binary);
        cmd.args(invocation.args());
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // The child must not outlive a dropped request or an expired deadline.
        cmd.kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| InvokeError::Failed(format!("failed to spawn {}: {}", self.binary, e)))?;

        let output = match tokio::time::timeout_at(deadline, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(InvokeError::Failed(format!(
                    "failed to wait for {}: {}",
                    self.binary, e
                )));
            }
            Err(_) => {
                tracing::debug!(
                    invocation = %invocation,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "CLI invocation hit deadline, killed"
                );
                return Err(InvokeError::DeadlineExceeded);
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if output.status.success() {
            tracing::debug!(invocation = %invocation, elapsed_ms, "CLI invocation succeeded");
            return Ok(stdout.trim().to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = diagnostic(&stderr, &stdout, &output.status.to_string());
        tracing::debug!(
            invocation = %invocation,
            elapsed_ms,
            error = %message,
            "CLI invocation failed"
        );
        Err(InvokeError::Failed(message))
    }
}

/// Pick the first non-empty of stderr, stdout, or the fault description.
fn diagnostic(stderr: &str, stdout: &str, fault: &str) -> String {
    [stderr.trim(), stdout.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or(fault)
        .to_string()
}
