//! Night-phase command handlers: `next_phase` and the three per-role
//! selections, which delegate straight to `crate::engine::night`.

use serde_json::Value;

use crate::domain::{GameError, ParticipantId, Phase, Session};

/// `next_phase`: the host-driven plain phase advance. `data.phase`, if
/// present, is an explicit destination override; otherwise the canonical
/// `plain_next` successor is used. Carries optimistic concurrency
/// implicitly: the dispatcher already re-reads `session.phase` under the
/// session lock, so a stale caller's expectation simply fails the
/// transition-validity check below with `conflict`.
///
/// `assign_roles` and `eliminate_player` each land the session on
/// `night_wolf` with `phaseStarted = false`; the host's first `next_phase`
/// call after either one wakes that same phase in place rather than
/// advancing past it, so a freshly entered night opens with selections
/// already accepted instead of requiring a second advance to "arrive".
pub fn next_phase(session: &mut Session, data: &Value) -> Result<(), GameError> {
    let requested = data
        .get("phase")
        .and_then(Value::as_str)
        .map(parse_phase)
        .transpose()?;

    if requested.is_none() && is_night_phase(session.phase) && !session.round_state.phase_started {
        wake_phase(session, session.phase);
        session.touch();
        return Ok(());
    }

    let destination = match requested {
        Some(explicit) => explicit,
        None => session.phase.plain_next().ok_or_else(|| {
            GameError::Preconditions(format!(
                "phase {:?} has no plain next_phase destination; use its dedicated action",
                session.phase
            ))
        })?,
    };

    if !session.phase.is_valid_transition(destination) {
        return Err(GameError::Conflict(format!(
            "cannot advance from {:?} to {destination:?}",
            session.phase
        )));
    }

    wake_phase(session, destination);
    session.phase = destination;
    session.touch();
    Ok(())
}

const fn is_night_phase(phase: Phase) -> bool {
    matches!(phase, Phase::NightWolf | Phase::NightDoctor | Phase::NightPolice)
}

/// Clears the entering phase's selections and marks it started, for
/// re-entry safety.
fn wake_phase(session: &mut Session, phase: Phase) {
    match phase {
        Phase::NightWolf => session.round_state.wolf_targets.clear(),
        Phase::NightDoctor => session.round_state.doctor_save_target = None,
        Phase::NightPolice => {
            session.round_state.police_inspect_target = None;
            session.round_state.police_inspect_result = None;
        }
        _ => {}
    }
    if is_night_phase(phase) {
        session.round_state.phase_started = true;
    }
}

fn parse_phase(raw: &str) -> Result<Phase, GameError> {
    serde_json::from_value(Value::String(raw.to_string()))
        .map_err(|_| GameError::InvalidInput(format!("unknown phase '{raw}'")))
}

/// Parses the `targetId` participant id shared by the role-action payloads.
pub fn parse_target(data: &Value) -> Result<ParticipantId, GameError> {
    data.get("targetId")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| GameError::InvalidInput("missing or malformed targetId".to_string()))
}
