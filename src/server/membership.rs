//! Leave requests, removal, role override, and game-ending. Removal follows
//! a "mutate then check capacity" shape: the participant is dropped first,
//! then the resulting headcount is checked against the attrition-reset
//! threshold rather than tearing the session down outright.

use serde_json::Value;

use crate::domain::session::{LeaveRequest, LeaveStatus};
use crate::domain::{GameError, LeaveRequestId, ParticipantId, Phase, Role, Session};

pub fn request_leave(session: &mut Session, participant_id: ParticipantId) -> Result<(), GameError> {
    if session
        .leave_requests
        .iter()
        .any(|r| r.participant_id == participant_id && r.status == LeaveStatus::Pending)
    {
        return Err(GameError::Conflict(
            "a leave request is already pending for this participant".to_string(),
        ));
    }
    session.leave_requests.push(LeaveRequest {
        id: LeaveRequestId::new_v4(),
        participant_id,
        status: LeaveStatus::Pending,
        processed_by: None,
        created_at: chrono::Utc::now(),
    });
    session.touch();
    Ok(())
}

pub fn approve_leave(session: &mut Session, data: &Value) -> Result<(), GameError> {
    let participant_id = participant_id_of(data)?;
    set_leave_status(session, participant_id, LeaveStatus::Approved)?;
    remove_and_maybe_reset(session, participant_id);
    Ok(())
}

pub fn deny_leave(session: &mut Session, data: &Value) -> Result<(), GameError> {
    let participant_id = participant_id_of(data)?;
    set_leave_status(session, participant_id, LeaveStatus::Denied)?;
    Ok(())
}

pub fn remove_player(session: &mut Session, data: &Value) -> Result<(), GameError> {
    let participant_id = participant_id_of(data)?;
    let participant = session
        .find_by_id(participant_id)
        .ok_or_else(|| GameError::NotFound("participant not found".to_string()))?;
    if participant.is_host {
        return Err(GameError::Forbidden("the host cannot remove itself".to_string()));
    }
    remove_and_maybe_reset(session, participant_id);
    Ok(())
}

pub fn change_role(session: &mut Session, data: &Value) -> Result<(), GameError> {
    let participant_id = participant_id_of(data)?;
    let new_role = data
        .get("newRole")
        .and_then(Value::as_str)
        .ok_or_else(|| GameError::InvalidInput("missing newRole".to_string()))?;
    let role: Role = serde_json::from_value(Value::String(new_role.to_string()))
        .map_err(|_| GameError::InvalidInput(format!("unknown role '{new_role}'")))?;
    let participant = session
        .participants
        .iter_mut()
        .find(|p| p.id == participant_id)
        .ok_or_else(|| GameError::NotFound("participant not found".to_string()))?;
    if participant.is_host {
        return Err(GameError::Forbidden("the host has no role".to_string()));
    }
    participant.role = role;
    session.touch();
    Ok(())
}

pub fn end_game(session: &mut Session) -> Result<(), GameError> {
    session.phase = Phase::Ended;
    session.touch();
    Ok(())
}

fn participant_id_of(data: &Value) -> Result<ParticipantId, GameError> {
    data.get("participantId")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| GameError::InvalidInput("missing or malformed participantId".to_string()))
}

fn set_leave_status(
    session: &mut Session,
    participant_id: ParticipantId,
    status: LeaveStatus,
) -> Result<(), GameError> {
    let host_id = session.host().id;
    let request = session
        .leave_requests
        .iter_mut()
        .find(|r| r.participant_id == participant_id && r.status == LeaveStatus::Pending)
        .ok_or_else(|| GameError::NotFound("no pending leave request for this participant".to_string()))?;
    request.status = status;
    request.processed_by = Some(host_id);
    session.touch();
    Ok(())
}

/// Removes `participant_id` and applies the attrition-reset rule if the
/// non-host count has dropped below the viable threshold.
fn remove_and_maybe_reset(session: &mut Session, participant_id: ParticipantId) {
    session.remove_participant(participant_id);
    if crate::domain::validation::is_attrition_threshold(session.non_host_count()) {
        session.reset_to_lobby();
    }
}
