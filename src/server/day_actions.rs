//! Day-phase command handlers: voting and elimination. Thin wrappers over
//! `crate::engine::votes` that parse the command payload.

use serde_json::Value;

use crate::domain::{GameError, ParticipantId, Session};
use crate::engine::votes::EliminationOutcome;

pub fn vote(session: &mut Session, voter: ParticipantId, data: &Value) -> Result<(), GameError> {
    let target = super::night_actions::parse_target(data)?;
    crate::engine::cast_vote(session, voter, target)
}

pub fn revoke_vote(session: &mut Session, voter: ParticipantId) -> Result<(), GameError> {
    crate::engine::revoke_vote(session, voter)
}

pub fn begin_voting(session: &mut Session) -> Result<(), GameError> {
    crate::engine::begin_voting(session)
}

pub fn final_vote(session: &mut Session) -> Result<(), GameError> {
    crate::engine::final_vote(session)
}

pub fn eliminate_player(session: &mut Session) -> Result<EliminationOutcome, GameError> {
    crate::engine::eliminate_player(session)
}
