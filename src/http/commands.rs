//! `POST /sessions/{sessionId}/commands`.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Json, http::StatusCode};
use serde::Serialize;

use crate::domain::{GameError, SessionId};
use crate::server::{CommandRequest, GameServer};

pub async fn handle_command(
    State(server): State<GameServer>,
    Path(session_id): Path<SessionId>,
    Json(request): Json<CommandRequest>,
) -> Response {
    match server.dispatch(session_id, request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(&err),
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    recovery: &'static str,
}

/// Maps a `GameError` to its HTTP status and JSON body. `Internal` errors
/// are logged here (never leaking detail past "internal error" to the
/// client).
pub fn error_response(err: &GameError) -> Response {
    let status = match err {
        GameError::NotFound(_) => StatusCode::NOT_FOUND,
        GameError::Forbidden(_) => StatusCode::FORBIDDEN,
        GameError::Preconditions(_) | GameError::Conflict(_) => StatusCode::CONFLICT,
        GameError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        GameError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if matches!(err, GameError::Internal(_)) {
        tracing::error!(%err, "internal error");
    }

    let body = ErrorBody {
        error: err.kind(),
        message: err.to_string(),
        recovery: err.recovery(),
    };
    (status, Json(body)).into_response()
}
