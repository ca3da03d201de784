//! Opaque identifiers used throughout the session engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies a [`crate::domain::session::Session`].
pub type SessionId = Uuid;

/// Identifies a [`crate::domain::session::Participant`] within a session.
pub type ParticipantId = Uuid;

/// Identifies a pending [`crate::domain::session::LeaveRequest`].
pub type LeaveRequestId = Uuid;

/// Opaque client-supplied identifier used to resolve a request to a participant.
///
/// Rejoining with the same `ClientId` restores the existing participant
/// rather than creating a new one.
pub type ClientId = String;

/// The human-facing join code for a session (six zero-padded decimal digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinCode(pub String);

impl JoinCode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JoinCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
