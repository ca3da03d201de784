//! Pure game-logic functions operating on a `&mut Session`: role assignment,
//! night resolution, vote tally, win evaluation, and the role-masking view
//! projector. No I/O, no locking — the store and dispatcher own those
//! concerns.

pub mod assign;
pub mod night;
pub mod projector;
pub mod votes;
pub mod win;

pub use assign::assign_roles;
pub use night::{doctor_save, police_inspect, reveal_dead, wolf_select};
pub use projector::{project, SessionView};
pub use votes::{begin_voting, cast_vote, eliminate_player, final_vote, revoke_vote, EliminationOutcome};
