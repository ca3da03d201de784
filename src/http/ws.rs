//! `GET /sessions/{sessionId}/ws`. Pushes a `{"type":"changed"}` frame after
//! every committed mutation instead of a full delta payload; the client
//! re-fetches via `GET /sessions?code=` on receipt, matching
//! `crate::realtime::SessionHub`'s dirty-signal model.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, Query, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::domain::SessionId;
use crate::server::GameServer;

use super::reads::viewer_client_id;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    #[serde(default)]
    pub client_id: Option<String>,
}

pub async fn websocket_handler(
    State(server): State<GameServer>,
    Path(session_id): Path<SessionId>,
    Query(query): Query<WsQuery>,
    headers: axum::http::HeaderMap,
    upgrade: WebSocketUpgrade,
) -> impl IntoResponse {
    let viewer = query.client_id.unwrap_or_else(|| viewer_client_id(&headers));
    upgrade.on_upgrade(move |socket| handle_socket(socket, server, session_id, viewer))
}

async fn handle_socket(mut socket: WebSocket, server: GameServer, session_id: SessionId, viewer: String) {
    let mut receiver = server.hub.subscribe(session_id);

    match server.read_view(session_id, &viewer).await {
        Ok(view) => {
            let Ok(text) = serde_json::to_string(&view) else {
                return;
            };
            if socket.send(Message::Text(text.into())).await.is_err() {
                return;
            }
        }
        Err(_) => {
            let _ = socket
                .send(Message::Text(r#"{"type":"not_found"}"#.to_string().into()))
                .await;
            return;
        }
    }

    loop {
        tokio::select! {
            changed = receiver.recv() => {
                match changed {
                    Ok(()) => {
                        if socket
                            .send(Message::Text(r#"{"type":"changed"}"#.to_string().into()))
                            .await
                            .is_err()
                        {
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => return,
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => return,
                    Some(Ok(_)) => continue,
                    Some(Err(_)) => return,
                }
            }
        }
    }
}
