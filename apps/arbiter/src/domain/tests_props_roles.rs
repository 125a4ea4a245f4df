//! Property tests for role assignment (pure domain).
//!
//! Slot contract:
//! - At most one live connection holds White, at most one holds Black
//! - Every other live connection is an Observer
//! - A vacated controlling slot is refillable by a later assign

use proptest::prelude::*;
use uuid::Uuid;

use crate::domain::roles::RoleRegistry;
use crate::domain::state::Role;

/// An arbitrary interleaving of assigns and releases over a small pool
/// of connection identities. `true` = assign, `false` = release.
fn action_sequence() -> impl Strategy<Value = Vec<(usize, bool)>> {
    prop::collection::vec((0usize..8, any::<bool>()), 0..64)
}

proptest! {
    /// Property: no sequence of assigns and releases ever yields two
    /// holders of the same controlling slot.
    #[test]
    fn prop_controlling_slots_stay_unique(actions in action_sequence()) {
        let pool: Vec<Uuid> = (0..8).map(|_| Uuid::new_v4()).collect();
        let mut registry = RoleRegistry::new();
        let mut live: Vec<(Uuid, Role)> = Vec::new();

        for (idx, is_assign) in actions {
            let conn = pool[idx];
            let already_live = live.iter().any(|(id, _)| *id == conn);
            if is_assign {
                if already_live {
                    continue;
                }
                let role = registry.assign(conn);
                live.push((conn, role));
            } else if already_live {
                registry.release(conn).expect("live connection must release");
                live.retain(|(id, _)| *id != conn);
            }

            let whites = live.iter().filter(|(id, _)| {
                registry.role_of(*id) == Ok(Role::White)
            }).count();
            let blacks = live.iter().filter(|(id, _)| {
                registry.role_of(*id) == Ok(Role::Black)
            }).count();

            prop_assert!(whites <= 1, "two connections hold White");
            prop_assert!(blacks <= 1, "two connections hold Black");

            // Everyone else observes.
            for (id, _) in &live {
                let role = registry.role_of(*id).expect("live connection has a role");
                if role != Role::White && role != Role::Black {
                    prop_assert_eq!(role, Role::Observer);
                }
            }

            prop_assert_eq!(registry.len(), live.len());
        }
    }

    /// Property: while both slots are reported present, a fresh arrival
    /// always lands as Observer.
    #[test]
    fn prop_overflow_is_observer(extra in 1usize..6) {
        let mut registry = RoleRegistry::new();
        registry.assign(Uuid::new_v4());
        registry.assign(Uuid::new_v4());
        prop_assert!(registry.both_controlling_present());

        for _ in 0..extra {
            prop_assert_eq!(registry.assign(Uuid::new_v4()), Role::Observer);
        }
    }
}
