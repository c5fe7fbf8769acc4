//! Business behavior invoked per event kind.

use std::error::Error;
use std::fmt;

use tracing::info;

use crate::domain::Message;

/// Error returned by a handler for a recognized event kind.
#[derive(Debug)]
pub enum HandlerError {
    /// The handler refused the message (business rule, bad content).
    Rejected(String),
    /// Other error.
    Other(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::Rejected(msg) => write!(f, "rejected: {}", msg),
            HandlerError::Other(e) => write!(f, "handler error: {}", e),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Other(e) => Some(e.as_ref()),
            HandlerError::Rejected(_) => None,
        }
    }
}

/// Per-kind behavior for consumed messages.
///
/// One method per declared event kind. Adding a kind to
/// [`EventType`](crate::envelope::EventType) means adding a method here and
/// an arm in the dispatcher.
///
/// Closures of the right shape are handlers for `CREATE`:
///
/// ```
/// use message_pipeline::consumer::{Dispatcher, DispatchOutcome, HandlerError};
/// use message_pipeline::domain::Message;
/// use message_pipeline::envelope::Envelope;
///
/// let dispatcher = Dispatcher::new(|message: &Message| -> Result<(), HandlerError> {
///     assert_eq!(message.message_id, 7);
///     Ok(())
/// });
/// let outcome = dispatcher.dispatch(&Envelope::create(7, Message::new(7, "x")));
/// assert_eq!(outcome, DispatchOutcome::Handled);
/// ```
pub trait MessageHandler: Send + Sync {
    fn on_create(&self, message: &Message) -> Result<(), HandlerError>;
}

impl<F> MessageHandler for F
where
    F: Fn(&Message) -> Result<(), HandlerError> + Send + Sync,
{
    fn on_create(&self, message: &Message) -> Result<(), HandlerError> {
        self(message)
    }
}

/// Handler that records each message it sees and does nothing else.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingHandler;

impl MessageHandler for LoggingHandler {
    fn on_create(&self, message: &Message) -> Result<(), HandlerError> {
        info!(message_id = message.message_id, "Handling CREATE message");
        Ok(())
    }
}
