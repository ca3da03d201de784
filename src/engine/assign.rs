//! Role assignment.
//!
//! Builds the fixed role multiset for the non-host participant count and
//! shuffles it onto the participant list with a uniform random permutation,
//! using `rand`'s `rand::rng()` / `SliceRandom::shuffle` API.

use rand::seq::SliceRandom;

use crate::domain::role::role_multiset;
use crate::domain::session::Session;
use crate::domain::{GameError, Role};

/// Assigns roles to every non-host participant of `session`, which must be
/// in `lobby` with at least six non-host participants. On success the
/// session's participants carry their assigned roles; the caller is
/// responsible for the phase transition to `night_wolf`.
pub fn assign_roles(session: &mut Session) -> Result<(), GameError> {
    use crate::domain::phase::Phase;
    if session.phase != Phase::Lobby {
        return Err(GameError::Preconditions(
            "roles can only be assigned from lobby".to_string(),
        ));
    }

    let n = session.non_host_count();
    if !crate::domain::validation::can_assign_roles(n) {
        return Err(GameError::Preconditions(format!(
            "at least 6 non-host participants are required, found {n}"
        )));
    }

    let mut roles: Vec<Role> = role_multiset(n);
    roles.shuffle(&mut rand::rng());

    let mut role_iter = roles.into_iter();
    for participant in session.participants.iter_mut().filter(|p| !p.is_host) {
        // `role_iter` was built with exactly `n` entries for `n` non-hosts.
        participant.role = role_iter
            .next()
            .expect("role multiset sized to non-host count");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::JoinCode;
    use crate::domain::role::werewolf_count;

    fn session_with_members(n: usize) -> Session {
        let mut session = Session::new(JoinCode("111111".into()), "host".into(), "Host".into());
        for i in 0..n {
            session.join(format!("client-{i}"), format!("Player {i}"));
        }
        session
    }

    #[test]
    fn assigns_exactly_the_fixed_distribution() {
        for n in [6, 8, 9, 12, 13, 20] {
            let mut session = session_with_members(n);
            assign_roles(&mut session).unwrap();
            let non_hosts: Vec<_> = session.participants.iter().filter(|p| !p.is_host).collect();
            let wolves = non_hosts.iter().filter(|p| p.role.is_werewolf()).count();
            let doctors = non_hosts
                .iter()
                .filter(|p| p.role == Role::Doctor)
                .count();
            let police = non_hosts
                .iter()
                .filter(|p| p.role == Role::Police)
                .count();
            assert_eq!(wolves, werewolf_count(n));
            assert_eq!(doctors, 1);
            assert_eq!(police, 1);
            assert_eq!(session.host().role, Role::None);
        }
    }

    #[test]
    fn rejects_below_minimum_size() {
        let mut session = session_with_members(5);
        assert!(matches!(
            assign_roles(&mut session),
            Err(GameError::Preconditions(_))
        ));
    }

    #[test]
    fn rejects_outside_lobby() {
        let mut session = session_with_members(6);
        session.phase = crate::domain::phase::Phase::NightWolf;
        assert!(matches!(
            assign_roles(&mut session),
            Err(GameError::Preconditions(_))
        ));
    }
}
