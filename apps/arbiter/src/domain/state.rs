use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// One of the two sides of the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// What a connection is allowed to do in the live session.
///
/// At most one connection holds `White` and at most one holds `Black`;
/// everyone else is an `Observer` with read-only visibility.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    White,
    Black,
    Observer,
}

impl Role {
    /// The side this role controls, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Role::White => Some(Side::White),
            Role::Black => Some(Side::Black),
            Role::Observer => None,
        }
    }

    pub fn for_side(side: Side) -> Role {
        match side {
            Side::White => Role::White,
            Side::Black => Role::Black,
        }
    }
}

/// Session lifecycle phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionPhase {
    /// Fewer than two controlling connections present; clock stopped.
    WaitingForPlayers,
    /// Both controlling roles filled; moves accepted, clock running.
    Active,
    /// A terminal condition fired; transient, resolved by reset.
    Terminal,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCause {
    Checkmate,
    Stalemate,
    Timeout,
    Abandonment,
    InsufficientMaterial,
    FiftyMoveRule,
}

/// Final verdict of a finished session. `winner` is `None` for draws.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameOutcome {
    pub winner: Option<Side>,
    pub cause: OutcomeCause,
}

impl GameOutcome {
    pub fn win(winner: Side, cause: OutcomeCause) -> Self {
        Self {
            winner: Some(winner),
            cause,
        }
    }

    pub fn draw(cause: OutcomeCause) -> Self {
        Self {
            winner: None,
            cause,
        }
    }
}

impl Display for GameOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (self.winner, self.cause) {
            (Some(w), OutcomeCause::Checkmate) => write!(f, "{w} wins by checkmate"),
            (Some(w), OutcomeCause::Timeout) => write!(f, "{w} wins by timeout"),
            (Some(w), OutcomeCause::Abandonment) => write!(f, "{w} wins by abandonment"),
            (Some(w), _) => write!(f, "{w} wins"),
            (None, OutcomeCause::Stalemate) => write!(f, "Draw by stalemate"),
            (None, OutcomeCause::InsufficientMaterial) => {
                write!(f, "Draw by insufficient material")
            }
            (None, OutcomeCause::FiftyMoveRule) => write!(f, "Draw by fifty-move rule"),
            (None, _) => write!(f, "Draw"),
        }
    }
}
