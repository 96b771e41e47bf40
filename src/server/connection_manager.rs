use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::protocol::{ConnectionId, ServerMessage};

/// Outbound queues of open connections. Delivery never blocks: a full or
/// closed queue drops the message.
pub(crate) struct ConnectionManager {
    clients: DashMap<ConnectionId, mpsc::Sender<Arc<ServerMessage>>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    pub fn register(&self, connection_id: ConnectionId, sender: mpsc::Sender<Arc<ServerMessage>>) {
        if self.clients.insert(connection_id, sender).is_some() {
            debug!(%connection_id, "Replaced outbound channel for connection");
        }
    }

    pub fn unregister(&self, connection_id: &ConnectionId) -> bool {
        self.clients.remove(connection_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn send_to(&self, connection_id: &ConnectionId, message: Arc<ServerMessage>) {
        let Some(sender) = self.clients.get(connection_id).map(|s| s.clone()) else {
            debug!(%connection_id, "No outbound channel for connection, message not sent");
            return;
        };

        if let Err(err) = sender.try_send(message) {
            warn!(%connection_id, error = %err, "Failed to enqueue message for connection");
        }
    }

    /// Deliver to every open connection.
    pub fn broadcast_all(&self, message: Arc<ServerMessage>) {
        let senders: Vec<_> = self
            .clients
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        for (connection_id, sender) in senders {
            if sender.try_send(Arc::clone(&message)).is_err() {
                warn!(%connection_id, "Failed to broadcast message to connection");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn send_to_unknown_connection_is_ignored() {
        let manager = ConnectionManager::new();
        manager.send_to(&Uuid::new_v4(), Arc::new(ServerMessage::Pong));
        assert_eq!(manager.len(), 0);
    }

    #[test]
    fn full_queue_drops_instead_of_blocking() {
        let manager = ConnectionManager::new();
        let id = Uuid::new_v4();
        let (tx, mut rx) = mpsc::channel(1);
        manager.register(id, tx);

        manager.send_to(&id, Arc::new(ServerMessage::Pong));
        manager.send_to(&id, Arc::new(ServerMessage::OpponentDisconnected));

        assert_eq!(*rx.try_recv().unwrap(), ServerMessage::Pong);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn broadcast_reaches_every_connection_until_unregistered() {
        let manager = ConnectionManager::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let (tx_a, mut rx_a) = mpsc::channel(4);
        let (tx_b, mut rx_b) = mpsc::channel(4);
        manager.register(a, tx_a);
        manager.register(b, tx_b);

        manager.broadcast_all(Arc::new(ServerMessage::Pong));
        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_ok());

        assert!(manager.unregister(&a));
        assert!(!manager.unregister(&a));
        assert_eq!(manager.len(), 1);

        manager.broadcast_all(Arc::new(ServerMessage::OpponentReconnected));
        assert!(rx_a.try_recv().is_err());
        assert_eq!(*rx_b.try_recv().unwrap(), ServerMessage::OpponentReconnected);
    }
}
