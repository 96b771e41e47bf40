#![cfg_attr(not(test), deny(clippy::panic))]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_excessive_bools
)]

//! # Chess Coordinator
//!
//! A WebSocket session coordinator that pairs two players into a chess game,
//! relays their moves and lets either side drop and come back.
//!
//! Game state is a small directory of seat assignments persisted to a JSON
//! file; there is no chess engine in the server.

/// Configuration loading and validation
pub mod config;

/// Game directory and its persistence backends
pub mod directory;

/// Structured logging configuration
pub mod logging;

/// WebSocket message protocol definitions
pub mod protocol;

/// Re-entry tokens for reclaiming abandoned seats
pub mod reconnection;

/// Connection liveness tracking
pub mod registry;

/// Game coordinator: matchmaking, relay and reconnection
pub mod server;

/// Pluggable move verification
pub mod validation;

/// WebSocket connection handling
pub mod websocket;

pub use server::{CoordinatorError, GameCoordinator};
