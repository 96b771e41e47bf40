// WebSocket module - organized into focused submodules
//
// - handler: WebSocket upgrade handler (entry point)
// - connection: per-connection read/write loops
// - sending: frame serialization
// - routes: HTTP router (websocket endpoint, health check)

mod connection;
mod handler;
mod routes;
mod sending;

use crate::server::GameCoordinator;
use std::sync::Arc;

pub use handler::websocket_handler;
pub use routes::{create_router, run_server};

/// Shared state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<GameCoordinator>,
    /// Largest accepted inbound text frame, in bytes.
    pub max_message_size: usize,
}

impl AppState {
    pub fn new(coordinator: Arc<GameCoordinator>, max_message_size: usize) -> Self {
        Self {
            coordinator,
            max_message_size,
        }
    }
}
