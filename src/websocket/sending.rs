use crate::protocol::{ConnectionId, ServerMessage};
use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::SinkExt;

/// Write one server message as a JSON text frame.
///
/// Serialization failures are logged and skipped; only a closed socket is an
/// error.
pub(super) async fn send_text_message(
    sender: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
    connection_id: &ConnectionId,
) -> Result<(), ()> {
    let json_message = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(%connection_id, "Failed to serialize message: {}", e);
            return Ok(());
        }
    };

    if sender
        .send(Message::Text(json_message.into()))
        .await
        .is_err()
    {
        tracing::debug!(%connection_id, "Failed to send message, connection closed");
        return Err(());
    }

    Ok(())
}
