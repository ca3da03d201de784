//! The night resolver: turns wolf selections and the doctor save into a
//! mortality set, atomically.

use std::collections::HashSet;

use crate::domain::session::{PoliceResult, Session};
use crate::domain::{GameError, ParticipantId, Phase, Role};

/// Resolves the current night's deaths and seals the police inspection
/// result. Only legal in `night_police`. Mutates `session` atomically: on
/// `Err`, nothing has changed.
pub fn reveal_dead(session: &mut Session) -> Result<(), GameError> {
    if session.phase != Phase::NightPolice {
        return Err(GameError::Preconditions(
            "reveal_dead is only legal in night_police".to_string(),
        ));
    }

    // T = deduplicated multi-wolf target set.
    let targets: HashSet<ParticipantId> = session.round_state.wolf_targets.values().copied().collect();

    // D = T \ {doctorSaveTarget}.
    let deaths: Vec<ParticipantId> = targets
        .into_iter()
        .filter(|t| Some(*t) != session.round_state.doctor_save_target)
        .collect();

    // Compute the police result if the inspection target was recorded but the
    // result not yet sealed (normally sealed immediately in `police_inspect`;
    // this is just a fallback for a skipped police phase).
    if session.round_state.police_inspect_result.is_none() {
        if let Some(target) = session.round_state.police_inspect_target {
            if let Some(participant) = session.find_by_id(target) {
                session.round_state.police_inspect_result = Some(if participant.role.is_werewolf()
                {
                    PoliceResult::Werewolf
                } else {
                    PoliceResult::NotWerewolf
                });
            }
        }
    }

    for id in &deaths {
        if let Some(p) = session.participants.iter_mut().find(|p| p.id == *id) {
            // Hosts hold role `None` and are never wolf targets, so this is
            // defense-in-depth rather than a reachable branch.
            if !p.is_host {
                p.alive = false;
            }
        }
    }

    session.round_state.resolved_deaths = deaths;

    match super::win::evaluate(session) {
        Some(win_state) => {
            session.win_state = win_state;
            session.phase = Phase::Ended;
        }
        None => {
            session.phase = Phase::Reveal;
        }
    }

    session.touch();
    Ok(())
}

/// Records a werewolf's target for the current night, overwriting any prior
/// selection by the same werewolf (last-write-wins per wolf).
pub fn wolf_select(
    session: &mut Session,
    wolf_id: ParticipantId,
    target_id: ParticipantId,
) -> Result<(), GameError> {
    require_phase_started(session, Phase::NightWolf)?;
    require_alive_role(session, wolf_id, Role::Werewolf)?;
    session.round_state.wolf_targets.insert(wolf_id, target_id);
    session.touch();
    Ok(())
}

/// Records the doctor's save target for the current night, overwriting any
/// prior selection.
pub fn doctor_save(
    session: &mut Session,
    doctor_id: ParticipantId,
    target_id: ParticipantId,
) -> Result<(), GameError> {
    require_phase_started(session, Phase::NightDoctor)?;
    require_alive_role(session, doctor_id, Role::Doctor)?;
    session.round_state.doctor_save_target = Some(target_id);
    session.touch();
    Ok(())
}

/// Records the police inspection target and immediately computes (and
/// seals) the result: the outcome is fixed the moment `police_inspect` is
/// called, and `reveal_dead` merely surfaces it.
pub fn police_inspect(
    session: &mut Session,
    police_id: ParticipantId,
    target_id: ParticipantId,
) -> Result<(), GameError> {
    require_phase_started(session, Phase::NightPolice)?;
    require_alive_role(session, police_id, Role::Police)?;

    let result = session
        .find_by_id(target_id)
        .map(|p| {
            if p.role.is_werewolf() {
                PoliceResult::Werewolf
            } else {
                PoliceResult::NotWerewolf
            }
        })
        .ok_or_else(|| GameError::NotFound("inspection target not found".to_string()))?;

    session.round_state.police_inspect_target = Some(target_id);
    session.round_state.police_inspect_result = Some(result);
    session.touch();
    Ok(())
}

fn require_phase_started(session: &Session, phase: Phase) -> Result<(), GameError> {
    if session.phase != phase {
        return Err(GameError::Preconditions(format!(
            "action requires phase {phase:?}, session is in {:?}",
            session.phase
        )));
    }
    if !session.round_state.phase_started {
        return Err(GameError::Preconditions(
            "the host has not yet woken this phase".to_string(),
        ));
    }
    Ok(())
}

fn require_alive_role(
    session: &Session,
    participant_id: ParticipantId,
    role: Role,
) -> Result<(), GameError> {
    let participant = session
        .find_by_id(participant_id)
        .ok_or_else(|| GameError::NotFound("participant not found".to_string()))?;
    if participant.role != role {
        return Err(GameError::Forbidden(format!(
            "action requires role {role:?}"
        )));
    }
    if !participant.alive {
        return Err(GameError::Preconditions(
            "dead participants may not act".to_string(),
        ));
    }
    Ok(())
}
