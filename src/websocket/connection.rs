use crate::protocol::{ClientMessage, ErrorCode, ServerMessage};
use axum::extract::ws::{Message, WebSocket};
use futures_util::StreamExt;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::sending::send_text_message;
use super::AppState;

pub(super) async fn handle_socket(socket: WebSocket, state: AppState, addr: SocketAddr) {
    let AppState {
        coordinator,
        max_message_size,
    } = state;
    let (mut sender, mut receiver) = socket.split();
    let queue_capacity = coordinator.config().channel_capacity.max(1);
    let (tx, mut rx) = mpsc::channel::<Arc<ServerMessage>>(queue_capacity);

    let connection_id = coordinator.register_client(tx).await;
    tracing::info!(%connection_id, client_addr = %addr, "WebSocket connection established");

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if send_text_message(&mut sender, &message, &connection_id)
                .await
                .is_err()
            {
                break;
            }
        }
    });

    let receive_coordinator = Arc::clone(&coordinator);
    let mut receive_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            let msg = match frame {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(%connection_id, "WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    if text.len() > max_message_size {
                        tracing::warn!(
                            %connection_id,
                            size = text.len(),
                            max = max_message_size,
                            "Message exceeds size limit"
                        );
                        receive_coordinator.send_error_to_connection(
                            &connection_id,
                            format!(
                                "Message too large ({} bytes, max {} bytes)",
                                text.len(),
                                max_message_size
                            ),
                            Some(ErrorCode::MessageTooLarge),
                        );
                        continue;
                    }

                    match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(message) => {
                            receive_coordinator
                                .handle_client_message(&connection_id, message)
                                .await;
                        }
                        Err(err) => {
                            tracing::warn!(%connection_id, error = %err, "Rejected client frame");
                            receive_coordinator.send_error_to_connection(
                                &connection_id,
                                format!("Invalid message format: {err}"),
                                Some(ErrorCode::InvalidInput),
                            );
                        }
                    }
                }
                Message::Binary(_) => {
                    tracing::debug!(%connection_id, "Ignoring binary frame");
                    receive_coordinator.send_error_to_connection(
                        &connection_id,
                        "Binary frames are not supported".to_string(),
                        Some(ErrorCode::InvalidInput),
                    );
                }
                Message::Close(_) => break,
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    });

    // Whichever side finishes first ends the connection. An event already
    // handed to the coordinator still runs to completion.
    tokio::select! {
        _ = &mut send_task => receive_task.abort(),
        _ = &mut receive_task => send_task.abort(),
    }

    coordinator.unregister_client(&connection_id).await;
    tracing::info!(%connection_id, client_addr = %addr, "WebSocket connection closed");
}
