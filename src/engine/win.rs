//! The win evaluator: the "final two" rule.

use crate::domain::session::{Session, WinState};

/// Evaluates the win condition over alive non-host participants. Returns
/// `None` if no terminal condition holds yet.
#[must_use]
pub fn evaluate(session: &Session) -> Option<WinState> {
    let alive = session.alive_non_hosts();
    let alive_wolves = alive.iter().filter(|p| p.role.is_werewolf()).count();

    if alive.len() <= 2 {
        return Some(if alive_wolves >= 1 {
            WinState::Werewolves
        } else {
            WinState::Villagers
        });
    }

    if alive_wolves == 0 {
        return Some(WinState::Villagers);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::JoinCode;
    use crate::domain::Role;

    fn session_with_roles(roles: &[Role]) -> Session {
        let mut session = Session::new(JoinCode("333333".into()), "host".into(), "Host".into());
        for (i, role) in roles.iter().enumerate() {
            let client_id = format!("client-{i}");
            session.join(client_id.clone(), format!("Player {i}"));
            let participant = session
                .participants
                .iter_mut()
                .find(|p| p.client_id == client_id)
                .unwrap();
            participant.role = *role;
        }
        session
    }

    #[test]
    fn no_win_while_many_alive_and_wolves_present() {
        let session = session_with_roles(&[
            Role::Werewolf,
            Role::Doctor,
            Role::Police,
            Role::Villager,
            Role::Villager,
            Role::Villager,
        ]);
        assert!(evaluate(&session).is_none());
    }

    #[test]
    fn villagers_win_once_no_wolves_remain_alive() {
        let mut session = session_with_roles(&[
            Role::Werewolf,
            Role::Doctor,
            Role::Police,
            Role::Villager,
            Role::Villager,
            Role::Villager,
        ]);
        session
            .participants
            .iter_mut()
            .find(|p| p.role.is_werewolf())
            .unwrap()
            .alive = false;
        assert_eq!(evaluate(&session), Some(WinState::Villagers));
    }

    #[test]
    fn final_two_with_a_wolf_is_a_wolf_win() {
        let mut session = session_with_roles(&[Role::Werewolf, Role::Villager]);
        for p in &mut session.participants {
            p.alive = true;
        }
        assert_eq!(evaluate(&session), Some(WinState::Werewolves));
    }

    #[test]
    fn final_two_with_no_wolf_is_a_villager_win() {
        let session = session_with_roles(&[Role::Doctor, Role::Villager]);
        assert_eq!(evaluate(&session), Some(WinState::Villagers));
    }
}
