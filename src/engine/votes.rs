//! Vote collection and tally.

use std::collections::HashMap;

use crate::domain::session::{Session, Vote, VotePhase};
use crate::domain::{GameError, ParticipantId, Phase};

/// Casts or overwrites `voter`'s vote for `target` in the current round and
/// phase. Upsert-by-`(voter, round, phase)`.
pub fn cast_vote(
    session: &mut Session,
    voter: ParticipantId,
    target: ParticipantId,
) -> Result<(), GameError> {
    let phase = current_vote_phase(session)?;
    require_alive_non_host(session, voter)?;

    let round = session.day_count;
    match session
        .votes
        .iter_mut()
        .find(|v| v.voter_id == voter && v.round == round && v.phase == phase)
    {
        Some(existing) => existing.target_id = target,
        None => session.votes.push(Vote {
            voter_id: voter,
            target_id: target,
            round,
            phase,
        }),
    }
    session.touch();
    Ok(())
}

/// Deletes `voter`'s vote for the current round and phase, if any.
pub fn revoke_vote(session: &mut Session, voter: ParticipantId) -> Result<(), GameError> {
    let phase = current_vote_phase(session)?;
    require_alive_non_host(session, voter)?;
    let round = session.day_count;
    session
        .votes
        .retain(|v| !(v.voter_id == voter && v.round == round && v.phase == phase));
    session.touch();
    Ok(())
}

/// `begin_voting`: enters `day_vote` from `reveal`.
pub fn begin_voting(session: &mut Session) -> Result<(), GameError> {
    if session.phase != Phase::Reveal {
        return Err(GameError::Preconditions(
            "begin_voting is only legal in reveal".to_string(),
        ));
    }
    session.phase = Phase::DayVote;
    session.touch();
    Ok(())
}

/// `final_vote`: enters `day_final_vote` from `day_vote`, clearing all prior
/// `day_vote` rows for the current round (clear-and-recast).
pub fn final_vote(session: &mut Session) -> Result<(), GameError> {
    if session.phase != Phase::DayVote {
        return Err(GameError::Preconditions(
            "final_vote is only legal in day_vote".to_string(),
        ));
    }
    let round = session.day_count;
    session
        .votes
        .retain(|v| !(v.round == round && v.phase == VotePhase::DayVote));
    session.phase = Phase::DayFinalVote;
    session.touch();
    Ok(())
}

/// Outcome of `eliminate_player`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EliminationOutcome {
    Eliminated(ParticipantId),
    NoElimination,
}

/// Tallies the `day_final_vote` rows and eliminates the single majority
/// target, or returns `NoElimination` on a tie or zero votes. Advances the
/// phase per the post-elimination rule: a win ends the game, otherwise the
/// round counter increments and a fresh night begins.
pub fn eliminate_player(session: &mut Session) -> Result<EliminationOutcome, GameError> {
    if session.phase != Phase::DayFinalVote {
        return Err(GameError::Preconditions(
            "eliminate_player is only legal in day_final_vote".to_string(),
        ));
    }

    let round = session.day_count;
    let mut counts: HashMap<ParticipantId, usize> = HashMap::new();
    for vote in session
        .votes
        .iter()
        .filter(|v| v.round == round && v.phase == VotePhase::DayFinalVote)
    {
        *counts.entry(vote.target_id).or_insert(0) += 1;
    }

    let outcome = match counts.values().copied().max() {
        None => EliminationOutcome::NoElimination,
        Some(max) => {
            let winners: Vec<ParticipantId> = counts
                .iter()
                .filter(|(_, count)| **count == max)
                .map(|(id, _)| *id)
                .collect();
            if winners.len() == 1 {
                EliminationOutcome::Eliminated(winners[0])
            } else {
                EliminationOutcome::NoElimination
            }
        }
    };

    if let EliminationOutcome::Eliminated(target) = outcome {
        if let Some(p) = session.participants.iter_mut().find(|p| p.id == target) {
            if !p.is_host {
                p.alive = false;
            }
        }
    }

    match super::win::evaluate(session) {
        Some(win_state) => {
            session.win_state = win_state;
            session.phase = Phase::Ended;
        }
        None => {
            session.day_count += 1;
            session.start_fresh_night();
        }
    }

    session.touch();
    Ok(outcome)
}

fn current_vote_phase(session: &Session) -> Result<VotePhase, GameError> {
    VotePhase::from_phase(session.phase).ok_or_else(|| {
        GameError::Preconditions("voting is only legal in day_vote or day_final_vote".to_string())
    })
}

fn require_alive_non_host(session: &Session, id: ParticipantId) -> Result<(), GameError> {
    let participant = session
        .find_by_id(id)
        .ok_or_else(|| GameError::NotFound("participant not found".to_string()))?;
    if participant.is_host {
        return Err(GameError::Forbidden("hosts may not vote".to_string()));
    }
    if !participant.alive {
        return Err(GameError::Preconditions(
            "dead participants may not vote".to_string(),
        ));
    }
    Ok(())
}
