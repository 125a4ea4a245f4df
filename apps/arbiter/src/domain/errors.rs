//! Domain-level error type for session coordination.
//!
//! These are recoverable conditions handled entirely inside the
//! coordinator: they produce a notification to the relevant connection
//! (or a log line) and never terminate the process.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The proposer's role does not control the side to move.
    WrongTurn,
    /// An operation referenced a connection the registry has never seen
    /// (or has already released, e.g. a duplicate disconnect).
    UnknownConnection(Uuid),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::WrongTurn => write!(f, "not this connection's turn"),
            DomainError::UnknownConnection(id) => write!(f, "unknown connection {id}"),
        }
    }
}

impl Error for DomainError {}
