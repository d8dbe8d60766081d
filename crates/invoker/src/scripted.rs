//! Queue-driven [`LedgerCli`] for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::{Invocation, InvokeError, LedgerCli};

/// Answers invocations from a pre-recorded queue, in order, and records
/// every invocation it receives.
#[derive(Debug, Default)]
pub struct ScriptedCli {
    responses: Mutex<VecDeque<Result<String, InvokeError>>>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful invocation printing `stdout`.
    pub fn respond(self, stdout: impl Into<String>) -> Self {
        self.then(Ok(stdout.into()))
    }

    /// Queue a failed invocation with the given diagnostic.
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.then(Err(InvokeError::Failed(message.into())))
    }

    pub fn then(self, response: Result<String, InvokeError>) -> Self {
        self.responses
            .lock()
            .expect("scripted responses poisoned")
            .push_back(response);
        self
    }

    /// Invocations received so far, in call order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().expect("scripted calls poisoned").clone()
    }

    /// Number of queued responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses
            .lock()
            .expect("scripted responses poisoned")
            .len()
    }
}

#[async_trait]
impl LedgerCli for ScriptedCli {
    async fn run(&self, invocation: &Invocation, _deadline: Instant) -> Result<String, InvokeError> {
        self.calls
            .lock()
            .expect("scripted calls poisoned")
            .push(invocation.clone());

        self.responses
            .lock()
            .expect("scripted responses poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(InvokeError::Failed(format!(
                    "no scripted response for `{}`",
                    invocation
                )))
            })
    }
}
