use std::error::Error;
use std::fmt;

/// Error turning an envelope into bytes or back.
#[derive(Debug)]
pub enum CodecError {
    /// JSON encoding or decoding failed.
    Json(serde_json::Error),
    /// Bitcode encoding or decoding failed.
    Bitcode(bitcode::Error),
    /// A codec name that this build does not know.
    UnknownCodec(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Json(e) => write!(f, "json codec: {}", e),
            CodecError::Bitcode(e) => write!(f, "bitcode codec: {}", e),
            CodecError::UnknownCodec(name) => write!(f, "unknown codec: {}", name),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CodecError::Json(e) => Some(e),
            CodecError::Bitcode(e) => Some(e),
            CodecError::UnknownCodec(_) => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::Json(err)
    }
}

impl From<bitcode::Error> for CodecError {
    fn from(err: bitcode::Error) -> Self {
        CodecError::Bitcode(err)
    }
}
