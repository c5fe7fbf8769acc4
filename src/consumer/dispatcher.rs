//! Type-based dispatch of inbound envelopes.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{error, info, warn};

use crate::bus::Frame;
use crate::codec::{Codec, CONTENT_TYPE_HEADER};
use crate::domain::Message;
use crate::envelope::{Envelope, EventType};

use super::handler::{HandlerError, MessageHandler};

/// What happened to one envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A recognized kind was handled successfully.
    Handled,
    /// The kind is not one this build handles; logged and dropped.
    Ignored,
    /// The handler returned an error or panicked.
    Failed(String),
    /// The frame did not decode into an envelope.
    Malformed(String),
}

impl DispatchOutcome {
    /// Whether the frame should be acknowledged to the transport.
    ///
    /// Ignored envelopes are acked too: redelivering a kind this build does
    /// not understand will not make it understandable.
    pub fn should_ack(&self) -> bool {
        matches!(self, DispatchOutcome::Handled | DispatchOutcome::Ignored)
    }
}

/// Routes each envelope to the handler method for its kind.
///
/// Stateless across envelopes. Every dispatch runs inside its own fault
/// boundary: handler errors and panics become [`DispatchOutcome::Failed`]
/// and never escape, so a bad message cannot take down the subscription.
pub struct Dispatcher<H> {
    handler: H,
    codec: Codec,
}

impl<H: MessageHandler> Dispatcher<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            codec: Codec::default(),
        }
    }

    /// Codec used for frames without a recognizable `content-type` header.
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn dispatch(&self, envelope: &Envelope<i64, Message>) -> DispatchOutcome {
        let event_type = envelope.event_type();
        info!(
            event_type = %event_type,
            key = envelope.key(),
            created_at = %envelope.event_created_at(),
            "Processing new message event"
        );

        let outcome = match event_type {
            EventType::Create => self.guarded(envelope, |h| h.on_create(envelope.data())),
            EventType::Unrecognized(tag) => {
                warn!(event_type = %tag, key = envelope.key(), "Event type not supported");
                DispatchOutcome::Ignored
            }
        };

        info!(key = envelope.key(), outcome = ?outcome, "End processing message");
        outcome
    }

    /// Decode a frame and dispatch the envelope inside it.
    ///
    /// The frame's `content-type` header picks the codec when present;
    /// otherwise the dispatcher's configured codec is used.
    pub fn dispatch_frame(&self, frame: &Frame) -> DispatchOutcome {
        let codec = frame
            .header(CONTENT_TYPE_HEADER)
            .and_then(Codec::from_content_type)
            .unwrap_or(self.codec);

        match codec.decode::<i64, Message>(&frame.payload) {
            Ok(envelope) => self.dispatch(&envelope),
            Err(e) => {
                error!(frame_id = %frame.id, channel = %frame.channel, %codec, error = %e, "Dropping undecodable frame");
                DispatchOutcome::Malformed(e.to_string())
            }
        }
    }

    fn guarded<F>(&self, envelope: &Envelope<i64, Message>, call: F) -> DispatchOutcome
    where
        F: FnOnce(&H) -> Result<(), HandlerError>,
    {
        match catch_unwind(AssertUnwindSafe(|| call(&self.handler))) {
            Ok(Ok(())) => DispatchOutcome::Handled,
            Ok(Err(e)) => {
                error!(key = envelope.key(), error = %e, "Handler failed");
                DispatchOutcome::Failed(e.to_string())
            }
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                error!(key = envelope.key(), panic = %reason, "Handler panicked");
                DispatchOutcome::Failed(format!("handler panicked: {}", reason))
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
