//! Background subscription driving a dispatcher from a transport.

use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::bus::{Subscriber, TransportError};

use super::dispatcher::{DispatchOutcome, Dispatcher};
use super::handler::MessageHandler;

/// Statistics from a subscription thread.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubscriptionStats {
    /// Envelopes handled by a recognized-kind handler.
    pub handled: usize,
    /// Envelopes with an unrecognized kind, logged and dropped.
    pub ignored: usize,
    /// Envelopes whose handler errored or panicked.
    pub failed: usize,
    /// Frames that did not decode.
    pub malformed: usize,
    /// Poll cycles completed.
    pub polls: usize,
    /// Poll calls that returned a transport error.
    pub poll_errors: usize,
}

impl SubscriptionStats {
    fn record(&mut self, outcome: &DispatchOutcome) {
        match outcome {
            DispatchOutcome::Handled => self.handled += 1,
            DispatchOutcome::Ignored => self.ignored += 1,
            DispatchOutcome::Failed(_) => self.failed += 1,
            DispatchOutcome::Malformed(_) => self.malformed += 1,
        }
    }
}

/// Handle to a background subscription thread. Drop or call `stop()` to shut down.
pub struct SubscriptionHandle {
    stop_tx: mpsc::Sender<()>,
    handle: Option<JoinHandle<SubscriptionStats>>,
}

impl SubscriptionHandle {
    /// Stop the subscription and wait for it to finish. Returns stats.
    pub fn stop(mut self) -> SubscriptionStats {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap_or_default()
        } else {
            SubscriptionStats::default()
        }
    }

    /// Whether the thread has exited (stopped, or the transport closed).
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
    }
}

/// Start consuming frames from `subscriber` and dispatching them.
///
/// Spawns a background thread that polls the subscriber. Every frame goes
/// through [`Dispatcher::dispatch_frame`], whose fault boundary keeps one bad
/// frame from ending the loop. Handled and ignored frames are acked; failed
/// and malformed frames are nacked with the reason.
///
/// Transport errors while polling are logged and retried after
/// `poll_interval`. A closed transport ends the subscription.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use message_pipeline::bus::InMemoryQueue;
/// use message_pipeline::consumer::{self, Dispatcher, LoggingHandler};
///
/// let queue = InMemoryQueue::new();
/// let dispatcher = Arc::new(Dispatcher::new(LoggingHandler));
/// let handle = consumer::subscribe(
///     dispatcher,
///     queue.subscriber("messages"),
///     Duration::from_millis(10),
/// );
///
/// let stats = handle.stop();
/// assert_eq!(stats.handled, 0);
/// ```
pub fn subscribe<H, S>(
    dispatcher: Arc<Dispatcher<H>>,
    subscriber: S,
    poll_interval: Duration,
) -> SubscriptionHandle
where
    H: MessageHandler + 'static,
    S: Subscriber + 'static,
{
    let (stop_tx, stop_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        let mut stats = SubscriptionStats::default();
        info!("Subscription started");

        loop {
            match stop_rx.try_recv() {
                Ok(()) | Err(TryRecvError::Disconnected) => break,
                Err(TryRecvError::Empty) => {}
            }

            stats.polls += 1;

            match subscriber.poll(poll_interval.as_millis() as u64) {
                Ok(Some(frame)) => {
                    let outcome = dispatcher.dispatch_frame(&frame);
                    stats.record(&outcome);

                    let settled = match &outcome {
                        DispatchOutcome::Handled | DispatchOutcome::Ignored => {
                            subscriber.ack(&frame.id)
                        }
                        DispatchOutcome::Failed(reason) | DispatchOutcome::Malformed(reason) => {
                            subscriber.nack(&frame.id, reason)
                        }
                    };
                    if let Err(e) = settled {
                        warn!(frame_id = %frame.id, error = %e, "Failed to settle frame");
                    }
                }
                Ok(None) => {}
                Err(TransportError::Closed) => {
                    warn!("Transport closed, ending subscription");
                    break;
                }
                Err(e) => {
                    stats.poll_errors += 1;
                    warn!(error = %e, "Poll failed, retrying");
                    thread::sleep(poll_interval);
                }
            }
        }

        debug!(?stats, "Subscription stopped");
        stats
    });

    SubscriptionHandle {
        stop_tx,
        handle: Some(handle),
    }
}
