//! Consumer side: subscribe to a channel and dispatch envelopes by kind.
//!
//! ```text
//! Subscriber::poll ──▶ Dispatcher::dispatch_frame ──▶ decode ──▶ match event_type
//!                                                                 ├─ CREATE  → MessageHandler::on_create
//!                                                                 └─ unknown → warn, ignore
//! ```

mod dispatcher;
mod handler;
mod subscription;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use handler::{HandlerError, LoggingHandler, MessageHandler};
pub use subscription::{subscribe, SubscriptionHandle, SubscriptionStats};
