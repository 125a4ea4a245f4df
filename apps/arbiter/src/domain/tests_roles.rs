use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::roles::RoleRegistry;
use crate::domain::state::{Role, Side};

#[test]
fn first_two_connections_take_controlling_slots_then_observers() {
    let mut registry = RoleRegistry::new();
    let (a, b, c, d) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    assert_eq!(registry.assign(a), Role::White);
    assert_eq!(registry.assign(b), Role::Black);
    assert_eq!(registry.assign(c), Role::Observer);
    assert_eq!(registry.assign(d), Role::Observer);

    assert!(registry.both_controlling_present());
    assert_eq!(registry.role_of(c), Ok(Role::Observer));
    assert_eq!(registry.controller_of(Side::White), Some(a));
    assert_eq!(registry.controller_of(Side::Black), Some(b));
}

#[test]
fn released_controlling_slot_is_refillable() {
    let mut registry = RoleRegistry::new();
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    registry.assign(a);
    registry.assign(b);
    assert_eq!(registry.release(a), Ok(Role::White));
    assert!(!registry.both_controlling_present());

    // The vacancy goes to the next arrival, not to an existing observer.
    assert_eq!(registry.assign(c), Role::White);
    assert!(registry.both_controlling_present());
}

#[test]
fn release_of_unknown_connection_reports_not_found() {
    let mut registry = RoleRegistry::new();
    let ghost = Uuid::new_v4();

    assert_eq!(
        registry.release(ghost),
        Err(DomainError::UnknownConnection(ghost))
    );
    assert_eq!(
        registry.role_of(ghost),
        Err(DomainError::UnknownConnection(ghost))
    );
}

#[test]
fn duplicate_release_is_not_found() {
    let mut registry = RoleRegistry::new();
    let a = Uuid::new_v4();

    registry.assign(a);
    assert_eq!(registry.release(a), Ok(Role::White));
    assert_eq!(registry.release(a), Err(DomainError::UnknownConnection(a)));
}

#[test]
fn reset_vacates_everything() {
    let mut registry = RoleRegistry::new();
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    registry.assign(a);
    registry.assign(b);
    registry.assign(c);
    registry.reset();

    assert!(registry.is_empty());
    assert!(!registry.both_controlling_present());
    assert_eq!(registry.assign(c), Role::White);
}
