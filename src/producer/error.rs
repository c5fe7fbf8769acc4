//! Error types for the producer entry point.

use std::error::Error;
use std::fmt;

use crate::publisher::PublishError;

/// Error type for produce requests.
#[derive(Debug)]
pub enum ProduceError {
    /// Publishing faulted. Carries the publisher's error untouched.
    Publish(PublishError),
    /// The blocking publish task did not run to completion.
    Aborted(String),
}

impl fmt::Display for ProduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProduceError::Publish(e) => write!(f, "publish failed: {}", e),
            ProduceError::Aborted(msg) => write!(f, "publish aborted: {}", msg),
        }
    }
}

impl Error for ProduceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProduceError::Publish(e) => Some(e),
            ProduceError::Aborted(_) => None,
        }
    }
}

impl From<PublishError> for ProduceError {
    fn from(err: PublishError) -> Self {
        ProduceError::Publish(err)
    }
}

impl ProduceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ProduceError::Publish(PublishError::Transport { .. }) => 502,
            ProduceError::Publish(PublishError::Codec(_)) => 500,
            ProduceError::Aborted(_) => 500,
        }
    }
}
