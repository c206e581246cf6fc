use crate::state::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use eduvane::models::event::GatewayEvent;
use eduvane::models::input::UnifiedInput;
use futures::{stream::StreamExt, Stream};
use serde::Deserialize;
use std::{
    convert::Infallible,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_stream::wrappers::ReceiverStream;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest {
    #[serde(flatten)]
    input: UnifiedInput,
    #[serde(default)]
    is_guest: bool,
}

// Server-sent event body, one `data:` frame per gateway event
pub struct SseResponse {
    rx: ReceiverStream<String>,
}

impl SseResponse {
    fn new(rx: ReceiverStream<String>) -> Self {
        Self { rx }
    }
}

impl Stream for SseResponse {
    type Item = Result<Bytes, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx)
            .poll_next(cx)
            .map(|opt| opt.map(|s| Ok(Bytes::from(s))))
    }
}

impl IntoResponse for SseResponse {
    fn into_response(self) -> Response {
        let body = axum::body::Body::from_stream(self);
        (
            [
                (header::CONTENT_TYPE, "text/event-stream"),
                (header::CACHE_CONTROL, "no-cache"),
                (header::CONNECTION, "keep-alive"),
            ],
            body,
        )
            .into_response()
    }
}

fn format_event(event: &GatewayEvent) -> Result<String, serde_json::Error> {
    Ok(format!("data: {}\n\n", serde_json::to_string(event)?))
}

async fn handler(State(state): State<AppState>, Json(request): Json<ReplyRequest>) -> SseResponse {
    let (tx, rx) = mpsc::channel(100);
    let gateway = Arc::clone(&state.gateway);

    tokio::spawn(async move {
        let mut events = gateway.process_input(request.input, request.is_guest);

        loop {
            match timeout(Duration::from_millis(500), events.next()).await {
                Ok(Some(event)) => {
                    let frame = match format_event(&event) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::error!("Error encoding {} event: {}", event.kind(), e);
                            break;
                        }
                    };
                    if let Err(e) = tx.send(frame).await {
                        tracing::error!("Error sending event through channel: {}", e);
                        break;
                    }
                }
                Ok(None) => break,
                // Heartbeat, used to stop relaying once the client has gone away
                Err(_) => {
                    if tx.is_closed() {
                        tracing::debug!("client disconnected before the reply finished");
                        break;
                    }
                }
            }
        }
    });

    SseResponse::new(ReceiverStream::new(rx))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/reply", post(handler))
        .with_state(state)
}
