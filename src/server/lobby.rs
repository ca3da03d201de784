//! Lobby-time operations: role assignment and joining. `create_session` and
//! `join_session` are not part of the authorized command matrix (they run
//! before a caller has a participant record), so they are invoked directly
//! by the HTTP layer via `GameServer`/`InMemoryGameStore` rather than
//! through `dispatch`.

use crate::domain::{GameError, Session};

/// `assign_roles`: builds the role distribution and atomically transitions
/// `lobby -> night_wolf` with a freshly initialized round state.
pub fn assign_roles(session: &mut Session) -> Result<(), GameError> {
    crate::engine::assign_roles(session)?;
    session.start_fresh_night();
    Ok(())
}

/// Joins `client_id` to the session, capped at 20 non-hosts and only while
/// `lobby`.
pub fn join_session(
    session: &mut Session,
    client_id: String,
    display_name: String,
) -> Result<crate::domain::ParticipantId, GameError> {
    use crate::domain::Phase;
    crate::domain::validation::validate_display_name(&display_name)
        .map_err(GameError::InvalidInput)?;

    if session.find_by_client(&client_id).is_none() {
        if session.phase != Phase::Lobby {
            return Err(GameError::Preconditions(
                "the session has already started".to_string(),
            ));
        }
        if !crate::domain::validation::has_room_for_join(session.non_host_count()) {
            return Err(GameError::Preconditions(
                "the session is full".to_string(),
            ));
        }
    }

    Ok(session.join(client_id, display_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::JoinCode;

    #[test]
    fn join_rejects_once_session_has_started() {
        let mut session = Session::new(JoinCode("101010".into()), "host".into(), "Host".into());
        session.phase = crate::domain::Phase::NightWolf;
        assert!(matches!(
            join_session(&mut session, "alice".into(), "Alice".into()),
            Err(GameError::Preconditions(_))
        ));
    }

    #[test]
    fn join_is_capped_at_twenty_non_hosts() {
        let mut session = Session::new(JoinCode("202020".into()), "host".into(), "Host".into());
        for i in 0..20 {
            join_session(&mut session, format!("client-{i}"), format!("P{i}")).unwrap();
        }
        assert!(matches!(
            join_session(&mut session, "overflow".into(), "Overflow".into()),
            Err(GameError::Preconditions(_))
        ));
    }

    #[test]
    fn rejoin_with_same_client_after_start_is_allowed() {
        let mut session = Session::new(JoinCode("303030".into()), "host".into(), "Host".into());
        join_session(&mut session, "alice".into(), "Alice".into()).unwrap();
        session.phase = crate::domain::Phase::NightWolf;
        // Idempotent join for an existing member does not re-check phase/capacity.
        assert!(join_session(&mut session, "alice".into(), "Alice".into()).is_ok());
    }
}
