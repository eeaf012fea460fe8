//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered live events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{EventTarget, WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::LiveEvent;
use crate::service::EventService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and answers them.
/// - Forwards live events matching the subscription filter.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<LiveEvent>,
    service: Arc<EventService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut subs, &service).await;
                        if let Some(json) = encode(&reply)
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(live) => {
                        if !subs.matches(live.event_id()) {
                            continue;
                        }
                        let msg = WsMessage::new(
                            uuid::Uuid::new_v4().to_string(),
                            WsMessageType::Event,
                            serde_json::to_value(&live).unwrap_or_default(),
                        );
                        if let Some(json) = encode(&msg)
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

fn encode(msg: &WsMessage) -> Option<String> {
    serde_json::to_string(msg).ok()
}

/// Answers one text frame from the client.
async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    service: &EventService,
) -> WsMessage {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error("", 400, "malformed JSON");
    };
    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return WsMessage::error(msg.id, 404, "unknown command");
    };

    match command {
        WsCommand::Subscribe { event_ids } => {
            let targets: Vec<EventTarget> = event_ids.iter().filter_map(|r| r.target()).collect();
            subs.subscribe(&targets);
            tracing::debug!(ids = ?subs.ids(), wildcard = subs.is_subscribed_all(), "ws subscribed");
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": subs.ids(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::Unsubscribe { event_ids } => {
            let targets: Vec<EventTarget> = event_ids.iter().filter_map(|r| r.target()).collect();
            subs.unsubscribe(&targets);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": subs.ids(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::GetEngagement { event_id } => {
            let Some(EventTarget::One(event_id)) = event_id.target() else {
                return WsMessage::error(msg.id, 400, "event_id must be a single event");
            };
            let engagement = service.engagement(event_id).await;
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "event_id": event_id,
                    "polls": engagement.polls,
                    "qa_questions": engagement.qa_questions,
                    "live_attendance": engagement.live_attendance,
                }),
            )
        }
    }
}
