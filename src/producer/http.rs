//! HTTP transport for the producer: maps requests to `produce_message`.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /produce`: body `{ "messageId": 42, "message": "hello" }`.
//!   Answers `204 No Content` once the publisher returns, including when the
//!   transport declined the frame.
//! - `GET /health`: returns `{ "ok": true, "channel": "messages" }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use message_pipeline::bus::InMemoryQueue;
//! use message_pipeline::producer::{self, MessageProducer};
//! use message_pipeline::publisher::{MessagePublisher, PublisherConfig};
//!
//! let producer = Arc::new(MessageProducer::new(MessagePublisher::new(
//!     InMemoryQueue::new(),
//!     PublisherConfig::default(),
//! )));
//!
//! // Get the router to compose with other axum routes
//! let app = producer::router(producer.clone());
//!
//! // Or serve directly
//! producer::serve(producer, "0.0.0.0:8080").await?;
//! ```

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info};

use crate::domain::MessageRequest;

use super::error::ProduceError;
use super::service::ProducerService;

/// Build an axum `Router` that publishes via the given producer.
pub fn router<P: ProducerService + 'static>(producer: Arc<P>) -> Router {
    Router::new()
        .route("/health", get(health_handler::<P>))
        .route("/produce", post(produce_handler::<P>))
        .with_state(producer)
}

/// Serve the producer over HTTP at the given address (e.g. `"0.0.0.0:8080"`).
pub async fn serve<P: ProducerService + 'static>(
    producer: Arc<P>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(producer);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Producer listening");
    axum::serve(listener, app).await
}

/// `GET /health`: returns `{ "ok": true, "channel": ... }`.
async fn health_handler<P: ProducerService + 'static>(
    State(producer): State<Arc<P>>,
) -> impl IntoResponse {
    Json(json!({ "ok": true, "channel": producer.channel() }))
}

/// `POST /produce`: publish the message in the body.
///
/// `produce_message` blocks on the transport, so it runs on tokio's
/// blocking pool rather than on an executor worker.
async fn produce_handler<P: ProducerService + 'static>(
    State(producer): State<Arc<P>>,
    Json(request): Json<MessageRequest>,
) -> impl IntoResponse {
    let message_id = request.message_id;
    let produced = tokio::task::spawn_blocking(move || producer.produce_message(request))
        .await
        .unwrap_or_else(|e| Err(ProduceError::Aborted(e.to_string())));

    match produced {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!(message_id, error = %e, "Produce request failed");
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
