use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::GameServer;

use super::{commands, reads};

/// Builds the full router: command endpoint, read endpoint, join/create
/// endpoints, the WebSocket upgrade, a liveness probe, and a metrics
/// endpoint, with CORS and trace layers wrapping the whole table.
#[must_use]
pub fn create_router(server: GameServer, cors: CorsLayer) -> Router {
    Router::new()
        .route("/sessions", post(reads::create_session))
        .route("/sessions/join", post(reads::join_session))
        .route("/sessions", get(reads::read_session))
        .route(
            "/sessions/{session_id}/commands",
            post(commands::handle_command),
        )
        .route("/sessions/{session_id}/ws", get(super::ws::websocket_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_text))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(server)
}

/// Builds a `CorsLayer` from the configured comma-separated origin list.
/// `"*"` (the default) yields a permissive layer; anything else is parsed
/// into an explicit allow-list.
#[must_use]
pub fn cors_layer(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        return CorsLayer::permissive();
    }

    let allowed: Vec<axum::http::HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

async fn health_check() -> &'static str {
    "ok"
}

/// `GET /metrics`: counters in Prometheus text exposition format.
async fn metrics_text(
    axum::extract::State(server): axum::extract::State<GameServer>,
) -> impl axum::response::IntoResponse {
    server.metrics.render_prometheus_text()
}
