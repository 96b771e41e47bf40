use axum::routing::get;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use super::handler::websocket_handler;
use super::AppState;
use crate::config::SecurityConfig;

/// Create the Axum router with WebSocket support
pub fn create_router(security: &SecurityConfig) -> axum::Router<AppState> {
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::trace::TraceLayer;

    let cors = match security.allowed_origins() {
        None => CorsLayer::permissive(),
        Some(configured) => {
            let origins: Vec<_> = configured
                .iter()
                .filter_map(|s| s.parse::<axum::http::HeaderValue>().ok())
                .collect();

            if origins.is_empty() {
                tracing::warn!("No valid CORS origins configured, using permissive CORS");
                CorsLayer::permissive()
            } else {
                CorsLayer::new()
                    .allow_origin(origins)
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
    };

    axum::Router::new()
        .route("/ws", get(websocket_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Serve the coordinator on an already bound listener until `shutdown`
/// resolves.
pub async fn run_server(
    listener: TcpListener,
    state: AppState,
    security: &SecurityConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = create_router(security).with_state(state);

    let addr = listener.local_addr()?;
    tracing::info!(%addr, "Chess coordinator listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    Ok(())
}
