use std::fmt::Display;

use thiserror::Error;

use substate_common::error::AppError;
use substate_decoders::StreamError;
use substate_invoker::InvokeError;

/// Failure of one fetch stage. The message always starts with the stage
/// that failed (e.g. `fetch subscription: ...`).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The CLI failed, or its output could not be interpreted.
    #[error("{context}: {message}")]
    Upstream {
        context: &'static str,
        message: String,
    },

    #[error("parse events payload: {0}")]
    MalformedStream(#[from] StreamError),

    /// The request deadline passed while this stage was running.
    #[error("{context}: deadline exceeded")]
    DeadlineExceeded { context: &'static str },
}

impl FetchError {
    pub(crate) fn invoke(context: &'static str, err: InvokeError) -> Self {
        match err {
            InvokeError::Failed(message) => FetchError::Upstream { context, message },
            InvokeError::DeadlineExceeded => FetchError::DeadlineExceeded { context },
        }
    }

    pub(crate) fn parse(context: &'static str, err: impl Display) -> Self {
        FetchError::Upstream {
            context,
            message: err.to_string(),
        }
    }

    pub fn is_deadline(&self) -> bool {
        matches!(self, FetchError::DeadlineExceeded { .. })
    }
}

/// Every fetch failure, deadline expiry included, is a bad gateway; the
/// stage prefix in the message tells them apart.
impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Upstream(err.to_string())
    }
}
