//! Rules-engine collaborator seam.
//!
//! The coordinator never computes move legality itself: it hands the
//! current position and a proposed move to a [`RulesEngine`] and accepts
//! whatever comes back. Positions are opaque whole values — the engine
//! returns a brand new [`Position`] on every accepted move and the
//! coordinator replaces its copy wholesale.

pub mod standard;

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::state::Side;

/// Serialized game position (FEN): board, side to move, castling
/// rights, en passant target, halfmove clock, fullmove number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(String);

impl Position {
    pub fn new(fen: impl Into<String>) -> Self {
        Self(fen.into())
    }

    pub fn as_fen(&self) -> &str {
        &self.0
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Promotion piece choice carried on a proposed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

/// A client's move proposal, exactly as it arrived on the wire.
/// Squares are algebraic ("e2", "e4"); validity is the engine's call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedMove {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
}

/// Terminal verdict for a position, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    /// The side to move is checkmated.
    Checkmate { loser: Side },
    Stalemate,
    /// Drawn by rule (fifty-move).
    Draw,
    InsufficientMaterial,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The proposed move is not legal in the given position.
    #[error("illegal move: {0}")]
    Illegal(String),
    /// The engine could not answer (corrupt position, internal fault).
    /// The coordinator treats the move as rejected — fail closed.
    #[error("rules engine unavailable: {0}")]
    Unavailable(String),
}

/// The external rules collaborator. Queries are synchronous and fast;
/// the coordinator calls them inline while holding the session.
pub trait RulesEngine: Send + Sync {
    /// The well-known start-of-game position.
    fn starting_position(&self) -> Position;

    /// Whose turn it is in `position`.
    fn side_to_move(&self, position: &Position) -> Result<Side, EngineError>;

    /// Validate `proposed` against `position`; on success return the
    /// resulting position.
    fn validate_move(
        &self,
        position: &Position,
        proposed: &ProposedMove,
    ) -> Result<Position, EngineError>;

    /// Terminal verdict for `position`, if any.
    fn terminal_status(&self, position: &Position)
        -> Result<Option<TerminalStatus>, EngineError>;
}
