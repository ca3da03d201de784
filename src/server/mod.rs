//! The command dispatcher and authorization matrix: one method per action, a
//! `tracing::info_span!` per command, and metrics incremented per outcome.
//! Every handler runs entirely inside `InMemoryGameStore::with_session`'s
//! closure, so the read-authorize-mutate-commit cycle is one transaction
//! by construction.

pub mod day_actions;
pub mod lobby;
pub mod maintenance;
pub mod membership;
pub mod night_actions;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ids::{ClientId, JoinCode};
use crate::domain::{GameError, Role, Session, SessionId};
use crate::engine::{project, SessionView};
use crate::metrics::Metrics;
use crate::realtime::SessionHub;
use crate::store::{GameStore, InMemoryGameStore};

/// The action names, as the snake_case strings carried in command requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    AssignRoles,
    NextPhase,
    WolfSelect,
    DoctorSave,
    PoliceInspect,
    RevealDead,
    BeginVoting,
    Vote,
    RevokeVote,
    FinalVote,
    EliminatePlayer,
    RequestLeave,
    ApproveLeave,
    DenyLeave,
    RemovePlayer,
    ChangeRole,
    EndGame,
}

impl Action {
    /// Whether the authorization matrix requires the caller to be the host
    /// for this action.
    #[must_use]
    pub const fn host_only(self) -> bool {
        !matches!(
            self,
            Self::WolfSelect
                | Self::DoctorSave
                | Self::PoliceInspect
                | Self::Vote
                | Self::RevokeVote
                | Self::RequestLeave
        )
    }

    /// Whether non-hosts are the ones authorized (the complement of
    /// `host_only`, restated for readability at call sites).
    #[must_use]
    pub const fn non_host_only(self) -> bool {
        matches!(self, Self::Vote | Self::RevokeVote | Self::RequestLeave)
    }
}

/// Body of `POST /sessions/{sessionId}/commands`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    pub action: Action,
    pub client_id: ClientId,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub view: SessionView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Value>,
}

/// Shared server state: the store, the realtime fan-out hub, and metrics
/// counters. Cloned cheaply (all fields are `Arc`-backed) and handed to the
/// HTTP layer as the one long-lived object the router's handlers close
/// over.
#[derive(Clone)]
pub struct GameServer {
    pub store: InMemoryGameStore,
    pub hub: SessionHub,
    pub metrics: Arc<Metrics>,
}

impl GameServer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: InMemoryGameStore::new(),
            hub: SessionHub::new(),
            metrics: Arc::new(Metrics::default()),
        }
    }

    /// Dispatches one command: loads the session, resolves the caller,
    /// authorizes, runs the handler, commits, and (on success) notifies the
    /// realtime hub.
    pub async fn dispatch(
        &self,
        session_id: SessionId,
        request: CommandRequest,
    ) -> Result<CommandResponse, GameError> {
        let span = crate::logging::command_span(session_id, request.action, &request.client_id);
        let _enter = span.enter();

        let action = request.action;
        let client_id = request.client_id.clone();
        let data = request.data.clone();

        let result = self
            .store
            .with_session(session_id, move |session| {
                let caller = session
                    .find_by_client(&client_id)
                    .ok_or_else(|| GameError::NotFound("participant not found".to_string()))?
                    .clone();
                authorize(session, &caller, action)?;
                let outcome = run_handler(session, &caller, action, &data)?;
                let view = project(session, &client_id);
                Ok((view, outcome))
            })
            .await;

        match &result {
            Ok(_) => self.metrics.record_command(action, "ok"),
            Err(err) => self.metrics.record_command(action, err.kind()),
        }

        let (view, outcome) = result?;
        self.hub.notify(session_id);
        tracing::info!(phase = ?view.phase, "command committed");
        Ok(CommandResponse { view, outcome })
    }

    /// Projects the current state of `session_id` for `viewer_client_id`,
    /// for `GET /sessions?code=` and the WebSocket upgrade's initial frame.
    pub async fn read_view(
        &self,
        session_id: SessionId,
        viewer_client_id: &str,
    ) -> Result<SessionView, GameError> {
        let session = self
            .store
            .get_session(session_id)
            .await
            .ok_or_else(|| GameError::NotFound("session not found".to_string()))?;
        Ok(project(&session, viewer_client_id))
    }

    pub async fn resolve_code(&self, code: &JoinCode) -> Result<SessionId, GameError> {
        self.store
            .resolve_code(code)
            .ok_or_else(|| GameError::NotFound("no session with that join code".to_string()))
    }

    /// `POST /sessions`: creates a new session with `host_name` as host.
    pub fn create_session(&self, host_client_id: ClientId, host_name: String) -> Session {
        let session = self
            .store
            .create_session(|code| Session::new(code, host_client_id.clone(), host_name.clone()));
        self.metrics.record_session_created();
        session
    }
}

impl Default for GameServer {
    fn default() -> Self {
        Self::new()
    }
}

fn authorize(session: &Session, caller: &crate::domain::Participant, action: Action) -> Result<(), GameError> {
    if action.host_only() && !caller.is_host {
        return Err(GameError::Forbidden(format!(
            "{action:?} requires the host"
        )));
    }
    if action.non_host_only() && caller.is_host {
        return Err(GameError::Forbidden(format!(
            "{action:?} is forbidden for the host"
        )));
    }

    let alive_required = matches!(
        action,
        Action::WolfSelect
            | Action::DoctorSave
            | Action::PoliceInspect
            | Action::Vote
            | Action::RevokeVote
    );
    if alive_required && !caller.alive {
        return Err(GameError::Preconditions(
            "dead participants may not act".to_string(),
        ));
    }

    let role_required = match action {
        Action::WolfSelect => Some(Role::Werewolf),
        Action::DoctorSave => Some(Role::Doctor),
        Action::PoliceInspect => Some(Role::Police),
        _ => None,
    };
    if let Some(role) = role_required {
        if caller.role != role {
            return Err(GameError::Forbidden(format!("{action:?} requires {role:?}")));
        }
    }

    use crate::domain::Phase;
    let phase_ok = match action {
        Action::AssignRoles => session.phase == Phase::Lobby,
        Action::NextPhase => session.phase != Phase::Ended,
        Action::WolfSelect => session.phase == Phase::NightWolf,
        Action::DoctorSave => session.phase == Phase::NightDoctor,
        Action::PoliceInspect => session.phase == Phase::NightPolice,
        Action::RevealDead => session.phase == Phase::NightPolice,
        Action::BeginVoting => session.phase == Phase::Reveal,
        Action::Vote | Action::RevokeVote => {
            matches!(session.phase, Phase::DayVote | Phase::DayFinalVote)
        }
        Action::FinalVote => session.phase == Phase::DayVote,
        Action::EliminatePlayer => session.phase == Phase::DayFinalVote,
        Action::RequestLeave
        | Action::ApproveLeave
        | Action::DenyLeave
        | Action::RemovePlayer
        | Action::ChangeRole
        | Action::EndGame => true,
    };
    if !phase_ok {
        return Err(GameError::Preconditions(format!(
            "{action:?} is not legal in phase {:?}",
            session.phase
        )));
    }

    Ok(())
}

fn run_handler(
    session: &mut Session,
    caller: &crate::domain::Participant,
    action: Action,
    data: &Value,
) -> Result<Option<Value>, GameError> {
    match action {
        Action::AssignRoles => lobby::assign_roles(session).map(|()| None),
        Action::NextPhase => night_actions::next_phase(session, data).map(|()| None),
        Action::WolfSelect => {
            let target = night_actions::parse_target(data)?;
            crate::engine::wolf_select(session, caller.id, target)?;
            Ok(None)
        }
        Action::DoctorSave => {
            let target = night_actions::parse_target(data)?;
            crate::engine::doctor_save(session, caller.id, target)?;
            Ok(None)
        }
        Action::PoliceInspect => {
            let target = night_actions::parse_target(data)?;
            crate::engine::police_inspect(session, caller.id, target)?;
            Ok(None)
        }
        Action::RevealDead => crate::engine::reveal_dead(session).map(|()| None),
        Action::BeginVoting => day_actions::begin_voting(session).map(|()| None),
        Action::Vote => day_actions::vote(session, caller.id, data).map(|()| None),
        Action::RevokeVote => day_actions::revoke_vote(session, caller.id).map(|()| None),
        Action::FinalVote => day_actions::final_vote(session).map(|()| None),
        Action::EliminatePlayer => {
            let outcome = day_actions::eliminate_player(session)?;
            Ok(Some(serde_json::to_value(outcome).map_err(|e| {
                GameError::Internal(format!("failed to encode outcome: {e}"))
            })?))
        }
        Action::RequestLeave => membership::request_leave(session, caller.id).map(|()| None),
        Action::ApproveLeave => membership::approve_leave(session, data).map(|()| None),
        Action::DenyLeave => membership::deny_leave(session, data).map(|()| None),
        Action::RemovePlayer => membership::remove_player(session, data).map(|()| None),
        Action::ChangeRole => membership::change_role(session, data).map(|()| None),
        Action::EndGame => membership::end_game(session).map(|()| None),
    }
}
