//! Single-process pipeline: HTTP producer and consumer sharing an
//! in-memory transport.

use std::sync::Arc;

use message_pipeline::bus::InMemoryQueue;
use message_pipeline::consumer::{self, Dispatcher, LoggingHandler};
use message_pipeline::producer::{self, MessageProducer};
use message_pipeline::publisher::MessagePublisher;
use message_pipeline::telemetry::init_tracing;
use message_pipeline::PipelineConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = PipelineConfig::load()?;
    init_tracing(&config.log_level);
    info!(channel = %config.channel, codec = %config.codec, "Starting message pipeline");

    let queue = InMemoryQueue::new();

    let dispatcher = Arc::new(Dispatcher::new(LoggingHandler).with_codec(config.codec));
    let subscription = consumer::subscribe(
        dispatcher,
        queue.subscriber(config.channel.clone()),
        config.poll_interval(),
    );

    let producer = Arc::new(MessageProducer::new(MessagePublisher::new(
        queue.clone(),
        config.publisher_config(),
    )));

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(addr = %listener.local_addr()?, "Producer listening");

    let served = axum::serve(listener, producer::router(producer))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    let stats = subscription.stop();
    info!(
        handled = stats.handled,
        ignored = stats.ignored,
        failed = stats.failed,
        malformed = stats.malformed,
        "Message pipeline stopped"
    );

    if let Err(e) = &served {
        error!(error = %e, "HTTP server failed");
    }
    Ok(served?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for ctrl-c");
    }
}
