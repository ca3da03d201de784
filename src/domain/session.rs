//! The `Session` aggregate and the entities it owns.
//!
//! `Session` exclusively owns its `Participant`, `RoundState`, `Vote`, and
//! `LeaveRequest` collections; dropping a `Session` drops all of them, so the
//! "destroying the Session cascades all children" invariant is structural.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ClientId, JoinCode, LeaveRequestId, ParticipantId, SessionId};
use super::phase::Phase;
use super::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinState {
    None,
    Villagers,
    Werewolves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotePhase {
    DayVote,
    DayFinalVote,
}

impl VotePhase {
    #[must_use]
    pub const fn from_phase(phase: Phase) -> Option<Self> {
        match phase {
            Phase::DayVote => Some(Self::DayVote),
            Phase::DayFinalVote => Some(Self::DayFinalVote),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Denied,
}

/// A single participant within a session. Hosts are participants with
/// `is_host = true`, `role = Role::None`, and `alive` always `true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub client_id: ClientId,
    pub display_name: String,
    pub role: Role,
    pub alive: bool,
    pub is_host: bool,
}

impl Participant {
    fn new_host(client_id: ClientId, display_name: String) -> Self {
        Self {
            id: ParticipantId::new_v4(),
            client_id,
            display_name,
            role: Role::None,
            alive: true,
            is_host: true,
        }
    }

    fn new_member(client_id: ClientId, display_name: String) -> Self {
        Self {
            id: ParticipantId::new_v4(),
            client_id,
            display_name,
            role: Role::None,
            alive: true,
            is_host: false,
        }
    }
}

/// Transient per-night selections. Reset to its empty form at the start of
/// every night cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundState {
    pub phase_started: bool,
    /// One entry per werewolf; last write for a given werewolf wins.
    pub wolf_targets: HashMap<ParticipantId, ParticipantId>,
    pub doctor_save_target: Option<ParticipantId>,
    pub police_inspect_target: Option<ParticipantId>,
    pub police_inspect_result: Option<PoliceResult>,
    pub resolved_deaths: Vec<ParticipantId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliceResult {
    Werewolf,
    NotWerewolf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub voter_id: ParticipantId,
    pub target_id: ParticipantId,
    pub round: u32,
    pub phase: VotePhase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: LeaveRequestId,
    pub participant_id: ParticipantId,
    pub status: LeaveStatus,
    pub processed_by: Option<ParticipantId>,
    pub created_at: DateTime<Utc>,
}

/// The authoritative, lockable aggregate for one game. Held by the store in
/// `Arc<tokio::sync::Mutex<Session>>` (see `crate::store`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub join_code: JoinCode,
    pub phase: Phase,
    pub day_count: u32,
    pub win_state: WinState,
    pub host_client_id: ClientId,
    pub participants: Vec<Participant>,
    pub round_state: RoundState,
    pub votes: Vec<Vote>,
    pub leave_requests: Vec<LeaveRequest>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Creates a new session in `lobby`, with `host_name` as the sole
    /// participant (the host).
    #[must_use]
    pub fn new(join_code: JoinCode, host_client_id: ClientId, host_name: String) -> Self {
        let now = Utc::now();
        let host = Participant::new_host(host_client_id.clone(), host_name);
        Self {
            id: SessionId::new_v4(),
            join_code,
            phase: Phase::Lobby,
            day_count: 0,
            win_state: WinState::None,
            host_client_id,
            participants: vec![host],
            round_state: RoundState::default(),
            votes: Vec::new(),
            leave_requests: Vec::new(),
            created_at: now,
            last_activity: now,
        }
    }

    #[must_use]
    pub fn host(&self) -> &Participant {
        // A session always has exactly one host, set at construction and
        // never removed (host abandonment destroys the session instead).
        self.participants
            .iter()
            .find(|p| p.is_host)
            .expect("session invariant: exactly one host")
    }

    #[must_use]
    pub fn find_by_client(&self, client_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.client_id == client_id)
    }

    #[must_use]
    pub fn find_by_id(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn non_host_count(&self) -> usize {
        self.participants.iter().filter(|p| !p.is_host).count()
    }

    #[must_use]
    pub fn alive_non_hosts(&self) -> Vec<&Participant> {
        self.participants
            .iter()
            .filter(|p| !p.is_host && p.alive)
            .collect()
    }

    /// Adds a new non-host participant, or returns the existing one if
    /// `client_id` is already a member (idempotent by client id).
    pub fn join(&mut self, client_id: ClientId, display_name: String) -> ParticipantId {
        if let Some(existing) = self.find_by_client(&client_id) {
            return existing.id;
        }
        let participant = Participant::new_member(client_id, display_name);
        let id = participant.id;
        self.participants.push(participant);
        self.touch();
        id
    }

    /// Removes a participant and cascades its votes and pending leave
    /// requests.
    pub fn remove_participant(&mut self, participant_id: ParticipantId) {
        self.participants.retain(|p| p.id != participant_id);
        self.votes.retain(|v| v.voter_id != participant_id);
        self.leave_requests
            .retain(|r| r.participant_id != participant_id);
        self.touch();
    }

    /// Resets the session to a fresh lobby, per the attrition-reset rule.
    /// Participants are retained with role cleared and alive restored.
    pub fn reset_to_lobby(&mut self) {
        self.phase = Phase::Lobby;
        self.day_count = 0;
        self.win_state = WinState::None;
        self.votes.clear();
        self.leave_requests.clear();
        self.round_state = RoundState::default();
        for p in &mut self.participants {
            if !p.is_host {
                p.role = Role::None;
                p.alive = true;
            }
        }
        self.touch();
    }

    /// Resets round-state and phase_started for the start of a new night
    /// cycle.
    pub fn start_fresh_night(&mut self) {
        self.round_state = RoundState::default();
        self.phase = Phase::NightWolf;
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}
