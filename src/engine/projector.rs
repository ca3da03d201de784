//! The view projector: the sole place a `Role` value is read for
//! cross-participant exposure. `SessionView`/`ParticipantView` are
//! distinct wire DTOs from the domain `Session`/`Participant` — no handler
//! may serialize the domain types directly, so there is no path by which an
//! unmasked role can reach a non-host viewer.

use serde::Serialize;

use crate::domain::ids::{JoinCode, ParticipantId, SessionId};
use crate::domain::phase::Phase;
use crate::domain::session::{PoliceResult, Session, WinState};
use crate::domain::Role;

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantView {
    pub id: ParticipantId,
    pub display_name: String,
    pub alive: bool,
    pub is_host: bool,
    /// `None` unless the viewer is the host, or this participant is the
    /// viewer themself.
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundStateView {
    pub phase_started: bool,
    /// Visible only to the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wolf_targets: Option<std::collections::HashMap<ParticipantId, ParticipantId>>,
    /// Visible only to the host and to the doctor that set it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_save_target: Option<ParticipantId>,
    /// Visible only to the inspecting police, keyed by their own id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub police_inspect_result: Option<PoliceResult>,
    /// Visible to all viewers once the session has entered `reveal` or
    /// later; empty before that.
    pub resolved_deaths: Vec<ParticipantId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: SessionId,
    pub join_code: JoinCode,
    pub phase: Phase,
    pub day_count: u32,
    pub win_state: WinState,
    pub viewer_participant_id: Option<ParticipantId>,
    pub viewer_is_host: bool,
    pub participants: Vec<ParticipantView>,
    pub round_state: RoundStateView,
}

/// Projects `session` for `viewer_client_id`. Returns a view with no
/// participant identity at all if the viewer is not a member (used by the
/// public `GET /sessions?code=` path before join).
#[must_use]
pub fn project(session: &Session, viewer_client_id: &str) -> SessionView {
    let viewer = session.find_by_client(viewer_client_id);
    let viewer_is_host = viewer.is_some_and(|p| p.is_host);
    let viewer_id = viewer.map(|p| p.id);

    let participants = session
        .participants
        .iter()
        .map(|p| ParticipantView {
            id: p.id,
            display_name: p.display_name.clone(),
            alive: p.alive,
            is_host: p.is_host,
            role: if viewer_is_host || Some(p.id) == viewer_id {
                Some(p.role)
            } else {
                None
            },
        })
        .collect();

    let round_state = project_round_state(session, viewer_is_host, viewer);

    SessionView {
        id: session.id,
        join_code: session.join_code.clone(),
        phase: session.phase,
        day_count: session.day_count,
        win_state: session.win_state,
        viewer_participant_id: viewer_id,
        viewer_is_host,
        participants,
        round_state,
    }
}

fn project_round_state(
    session: &Session,
    viewer_is_host: bool,
    viewer: Option<&crate::domain::Participant>,
) -> RoundStateView {
    let rs = &session.round_state;

    let wolf_targets = viewer_is_host.then(|| rs.wolf_targets.clone());

    let doctor_save_target = if viewer_is_host {
        rs.doctor_save_target
    } else if let Some(v) = viewer {
        if v.role == Role::Doctor {
            rs.doctor_save_target
        } else {
            None
        }
    } else {
        None
    };

    let police_inspect_result = if viewer_is_host {
        rs.police_inspect_result
    } else if let Some(v) = viewer {
        if v.role == Role::Police {
            rs.police_inspect_result
        } else {
            None
        }
    } else {
        None
    };

    let resolved_deaths = if matches!(
        session.phase,
        Phase::Reveal | Phase::DayVote | Phase::DayFinalVote | Phase::Ended
    ) || viewer_is_host
    {
        rs.resolved_deaths.clone()
    } else {
        Vec::new()
    };

    RoundStateView {
        phase_started: rs.phase_started,
        wolf_targets,
        doctor_save_target,
        police_inspect_result,
        resolved_deaths,
    }
}
