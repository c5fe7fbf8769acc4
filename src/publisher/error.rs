use std::error::Error;
use std::fmt;

use crate::bus::TransportError;
use crate::codec::CodecError;

/// Error publishing a message.
///
/// A soft refusal by the transport is not an error; it is logged and the
/// publish still succeeds. Only hard faults end up here.
#[derive(Debug)]
pub enum PublishError {
    /// The envelope could not be encoded.
    Codec(CodecError),
    /// The transport faulted while sending. The transport's own error is
    /// kept as-is and exposed through `source()`.
    Transport {
        channel: String,
        source: TransportError,
    },
}

impl PublishError {
    /// The underlying transport fault, if that is what failed.
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            PublishError::Transport { source, .. } => Some(source),
            PublishError::Codec(_) => None,
        }
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::Codec(e) => write!(f, "failed to encode envelope: {}", e),
            PublishError::Transport { channel, source } => {
                write!(f, "failed to send on channel '{}': {}", channel, source)
            }
        }
    }
}

impl Error for PublishError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PublishError::Codec(e) => Some(e),
            PublishError::Transport { source, .. } => Some(source),
        }
    }
}

impl From<CodecError> for PublishError {
    fn from(err: CodecError) -> Self {
        PublishError::Codec(err)
    }
}
