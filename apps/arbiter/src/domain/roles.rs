//! Connection-to-role assignments for the live session.

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::state::{Role, Side};

/// Tracks which connection controls which side.
///
/// The two controlling slots go first-come: the first connection gets
/// White, the second Black, everyone after that observes. A vacated
/// controlling slot is refillable by a later `assign`.
#[derive(Debug, Default)]
pub struct RoleRegistry {
    white: Option<Uuid>,
    black: Option<Uuid>,
    members: HashMap<Uuid, Role>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a role to a newly arrived connection.
    pub fn assign(&mut self, conn_id: Uuid) -> Role {
        let role = if self.white.is_none() {
            self.white = Some(conn_id);
            Role::White
        } else if self.black.is_none() {
            self.black = Some(conn_id);
            Role::Black
        } else {
            Role::Observer
        };
        self.members.insert(conn_id, role);
        role
    }

    /// Remove a connection, returning the role it held. Controlling
    /// slots become vacant again.
    pub fn release(&mut self, conn_id: Uuid) -> Result<Role, DomainError> {
        let role = self
            .members
            .remove(&conn_id)
            .ok_or(DomainError::UnknownConnection(conn_id))?;
        match role {
            Role::White => self.white = None,
            Role::Black => self.black = None,
            Role::Observer => {}
        }
        Ok(role)
    }

    pub fn role_of(&self, conn_id: Uuid) -> Result<Role, DomainError> {
        self.members
            .get(&conn_id)
            .copied()
            .ok_or(DomainError::UnknownConnection(conn_id))
    }

    /// The connection currently controlling `side`, if any.
    pub fn controller_of(&self, side: Side) -> Option<Uuid> {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    pub fn both_controlling_present(&self) -> bool {
        self.white.is_some() && self.black.is_some()
    }

    /// Drop every assignment (session reset).
    pub fn reset(&mut self) {
        self.white = None;
        self.black = None;
        self.members.clear();
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
