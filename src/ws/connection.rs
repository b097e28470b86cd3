//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! answering client commands and forwarding events from the observer's
//! [`Subscription`].

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use super::messages::{WsCommand, WsMessage, WsMessageType, WsRequest};
use crate::domain::{FeedbackEvent, Subscription, Topic};

enum Step {
    Inbound(Option<Result<Message, axum::Error>>),
    Outbound(Option<FeedbackEvent>),
}

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and answers them.
/// - Forwards every event matching the subscription's topic.
///
/// The subscription is released when the client closes, a send fails,
/// or the event bus shuts down.
pub async fn run_connection(socket: WebSocket, mut subscription: Subscription) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    tracing::debug!(topic = ?subscription.topic(), "ws observer connected");

    loop {
        let step = tokio::select! {
            msg = ws_rx.next() => Step::Inbound(msg),
            event = subscription.recv() => Step::Outbound(event),
        };

        match step {
            Step::Inbound(Some(Ok(Message::Text(text)))) => {
                let reply = handle_text_message(text.as_str(), &mut subscription);
                if ws_tx.send(Message::text(reply)).await.is_err() {
                    break;
                }
            }
            Step::Inbound(Some(Ok(Message::Close(_))) | None | Some(Err(_))) => break,
            Step::Inbound(Some(Ok(_))) => {}
            Step::Outbound(Some(event)) => {
                let msg = WsMessage::new(
                    uuid::Uuid::new_v4().to_string(),
                    WsMessageType::Event,
                    serde_json::to_value(&event).unwrap_or_default(),
                );
                if ws_tx.send(Message::text(msg.to_json())).await.is_err() {
                    tracing::debug!("ws observer unreachable, dropping connection");
                    break;
                }
            }
            Step::Outbound(None) => break,
        }
    }

    subscription.unsubscribe();
    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning the JSON reply.
fn handle_text_message(text: &str, subscription: &mut Subscription) -> String {
    let Ok(request) = serde_json::from_str::<WsRequest>(text) else {
        return WsMessage::new(
            String::new(),
            WsMessageType::Error,
            serde_json::json!({
                "code": 400,
                "message": "malformed command"
            }),
        )
        .to_json();
    };

    let payload = match request.command {
        WsCommand::Watch { activity_id } => {
            let topic = activity_id.map_or(Topic::Global, Topic::Activity);
            subscription.retarget(topic);
            serde_json::json!({
                "watching": activity_id.map_or_else(|| "*".to_string(), |id| id.to_string()),
            })
        }
        WsCommand::Ping => serde_json::json!({ "pong": true }),
    };

    WsMessage::new(request.id, WsMessageType::Response, payload).to_json()
}
