//! Core game entities: the `Session` aggregate, its owned collections, the
//! phase machine, roles, and the error taxonomy. Pure data and pure
//! invariant-preserving methods only — no I/O, no locking, no transport.

pub mod codes;
pub mod error;
pub mod ids;
pub mod phase;
pub mod role;
pub mod session;
pub mod validation;

pub use error::GameError;
pub use ids::{ClientId, JoinCode, LeaveRequestId, ParticipantId, SessionId};
pub use phase::Phase;
pub use role::Role;
pub use session::{
    LeaveRequest, LeaveStatus, Participant, PoliceResult, RoundState, Session, Vote, VotePhase,
    WinState,
};
