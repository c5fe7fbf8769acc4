use std::error::Error;
use std::fmt;

/// A hard transport fault.
///
/// Distinct from a soft refusal: `Sender::send` returning `Ok(false)` means
/// the frame was not accepted but nothing is broken. An `Err` carrying one of
/// these means the transport itself failed.
#[derive(Debug)]
pub enum TransportError {
    /// Connection to the broker failed
    ConnectionFailed(String),
    /// The broker rejected the frame outright
    Rejected(String),
    /// Timeout waiting on the transport
    Timeout,
    /// The transport has been shut down
    Closed,
    /// Other error
    Other(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            TransportError::Rejected(msg) => write!(f, "Frame rejected: {}", msg),
            TransportError::Timeout => write!(f, "Transport timeout"),
            TransportError::Closed => write!(f, "Transport closed"),
            TransportError::Other(e) => write!(f, "Transport error: {}", e),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TransportError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
