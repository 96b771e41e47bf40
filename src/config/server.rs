//! Coordinator behavior configuration.

use super::defaults::{
    default_channel_capacity, default_enable_admin_events, default_require_reentry_token,
    default_seed_test_game,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Add a synthetic test game at startup when the loaded directory is empty
    #[serde(default = "default_seed_test_game")]
    pub seed_test_game: bool,
    /// Refuse `reconnectToGame` requests that carry no re-entry token
    #[serde(default = "default_require_reentry_token")]
    pub require_reentry_token: bool,
    /// Accept `addTestGame` and `clearAllGames` from clients
    #[serde(default = "default_enable_admin_events")]
    pub enable_admin_events: bool,
    /// Outbound queue depth per connection; messages beyond it are dropped
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            seed_test_game: default_seed_test_game(),
            require_reentry_token: default_require_reentry_token(),
            enable_admin_events: default_enable_admin_events(),
            channel_capacity: default_channel_capacity(),
        }
    }
}
