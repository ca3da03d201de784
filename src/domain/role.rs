//! The four non-host roles and the role-distribution rule for a session size.

use serde::{Deserialize, Serialize};

/// A participant's secret role. `None` is used for the host and for
/// participants before role assignment has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    None,
    Villager,
    Werewolf,
    Doctor,
    Police,
}

impl Role {
    #[must_use]
    pub const fn is_werewolf(self) -> bool {
        matches!(self, Self::Werewolf)
    }
}

/// Number of werewolves for a non-host participant count `n`:
/// 1 if `n <= 8`, 2 if `9 <= n <= 12`, 3 if `n >= 13`.
#[must_use]
pub const fn werewolf_count(n: usize) -> usize {
    if n <= 8 {
        1
    } else if n <= 12 {
        2
    } else {
        3
    }
}

/// Builds the fixed role multiset for `n` non-host participants: `k` werewolves,
/// one doctor, one police, and `n - k - 2` villagers.
#[must_use]
pub fn role_multiset(n: usize) -> Vec<Role> {
    let k = werewolf_count(n);
    let mut roles = Vec::with_capacity(n);
    roles.extend(std::iter::repeat_n(Role::Werewolf, k));
    roles.push(Role::Doctor);
    roles.push(Role::Police);
    roles.extend(std::iter::repeat_n(Role::Villager, n.saturating_sub(k + 2)));
    roles
}
