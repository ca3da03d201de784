//! `POST /sessions`, `POST /sessions/join`, and `GET /sessions?code=`.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::ids::JoinCode;
use crate::domain::GameError;
use crate::engine::SessionView;
use crate::server::GameServer;

use super::commands::error_response;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub host_name: String,
    pub client_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: crate::domain::SessionId,
    pub join_code: JoinCode,
    pub host_participant_id: crate::domain::ParticipantId,
}

pub async fn create_session(
    State(server): State<GameServer>,
    Json(request): Json<CreateSessionRequest>,
) -> impl IntoResponse {
    if let Err(message) = crate::domain::validation::validate_display_name(&request.host_name) {
        return error_response(&GameError::InvalidInput(message));
    }

    let session = server.create_session(request.client_id, request.host_name);
    tracing::info!(session_id = %session.id, "session created");
    (
        StatusCode::OK,
        Json(CreateSessionResponse {
            session_id: session.id,
            host_participant_id: session.host().id,
            join_code: session.join_code,
        }),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
pub struct JoinSessionRequest {
    pub join_code: JoinCode,
    pub display_name: String,
    pub client_id: String,
}

#[derive(Debug, Serialize)]
pub struct JoinSessionResponse {
    pub session_id: crate::domain::SessionId,
    pub participant_id: crate::domain::ParticipantId,
    pub view: SessionView,
}

pub async fn join_session(
    State(server): State<GameServer>,
    Json(request): Json<JoinSessionRequest>,
) -> impl IntoResponse {
    let session_id = match server.resolve_code(&request.join_code).await {
        Ok(id) => id,
        Err(err) => return error_response(&err),
    };

    let result = server
        .store
        .with_session(session_id, move |session| {
            let participant_id = crate::server::lobby::join_session(
                session,
                request.client_id.clone(),
                request.display_name.clone(),
            )?;
            let view = crate::engine::project(session, &request.client_id);
            Ok((participant_id, view))
        })
        .await;

    match result {
        Ok((participant_id, view)) => {
            server.hub.notify(session_id);
            (
                StatusCode::OK,
                Json(JoinSessionResponse {
                    session_id,
                    participant_id,
                    view,
                }),
            )
                .into_response()
        }
        Err(err) => error_response(&err),
    }
}

#[derive(Debug, Deserialize)]
pub struct ReadSessionQuery {
    pub code: JoinCode,
}

pub async fn read_session(
    State(server): State<GameServer>,
    Query(query): Query<ReadSessionQuery>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    let viewer = viewer_client_id(&headers);
    let session_id = match server.resolve_code(&query.code).await {
        Ok(id) => id,
        Err(err) => return error_response(&err),
    };
    match server.read_view(session_id, &viewer).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// Resolves the viewer's client identity from the `x-client-id` header or a
/// `clientId` cookie, as specified for the read endpoint.
pub fn viewer_client_id(headers: &axum::http::HeaderMap) -> String {
    if let Some(value) = headers.get("x-client-id").and_then(|v| v.to_str().ok()) {
        return value.to_string();
    }
    headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookie| {
            cookie.split(';').find_map(|kv| {
                let (key, value) = kv.split_once('=')?;
                (key.trim() == "clientId").then(|| value.trim().to_string())
            })
        })
        .unwrap_or_default()
}
