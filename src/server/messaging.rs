use super::{CoordinatorError, GameCoordinator};
use crate::protocol::{ConnectionId, ErrorCode, ServerMessage};
use std::sync::Arc;

impl GameCoordinator {
    /// Enqueue `message` for one connection.
    pub(crate) fn send(&self, connection_id: &ConnectionId, message: ServerMessage) {
        self.connection_manager
            .send_to(connection_id, Arc::new(message));
    }

    /// Send an error message to a specific connection.
    pub fn send_error_to_connection(
        &self,
        connection_id: &ConnectionId,
        message: String,
        error_code: Option<ErrorCode>,
    ) {
        self.send(
            connection_id,
            ServerMessage::Error {
                message,
                error_code,
            },
        );
    }

    pub(crate) fn report_error(&self, connection_id: &ConnectionId, err: &CoordinatorError) {
        tracing::info!(
            %connection_id,
            game_id = err.game_id().unwrap_or_default(),
            error = %err,
            "Request rejected"
        );
        self.send_error_to_connection(connection_id, err.to_string(), Some(err.error_code()));
    }
}
