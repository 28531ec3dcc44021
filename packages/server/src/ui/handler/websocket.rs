//! WebSocket connection handlers.
//!
//! Each connection gets a receive task that decodes frames and forwards them
//! to the session coordinator, and a send task that drains the connection's
//! outbound channel. Neither task touches the session directly.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    infrastructure::dto::websocket::{DecodeError, decode_client_message},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Create a channel for this connection to receive messages
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let user_id = match state.coordinator.connect(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to register connection: {}", e);
            return;
        }
    };

    let (mut sender, mut receiver) = socket.split();

    let coordinator = state.coordinator.clone();
    let recv_user_id = user_id.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error from '{}': {}", recv_user_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", recv_user_id, text.as_str());

                    let message = match decode_client_message(text.as_str()) {
                        Ok(message) => message,
                        Err(DecodeError::UnknownType(t)) => {
                            tracing::debug!("Ignoring unknown message type '{}'", t);
                            continue;
                        }
                        Err(e) => {
                            tracing::warn!("Dropping message from '{}': {}", recv_user_id, e);
                            continue;
                        }
                    };

                    if coordinator
                        .inbound(recv_user_id.clone(), message, text.to_string())
                        .is_err()
                    {
                        tracing::error!("Session coordinator stopped");
                        break;
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::debug!("Client '{}' requested close", recv_user_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward queued messages to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if state.coordinator.disconnect(user_id.clone()).is_err() {
        tracing::warn!("Could not report disconnect of '{}'", user_id);
    }
}
