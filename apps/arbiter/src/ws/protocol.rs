use serde::{Deserialize, Serialize};

use crate::domain::state::{OutcomeCause, Role, Side};
use crate::engine::{Position, ProposedMove};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    ProposeMove { mv: ProposedMove },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    RoleAssigned {
        role: Role,
    },

    BothPresent,

    MoveAccepted {
        mv: ProposedMove,
        position: Position,
    },

    MoveRejected {
        mv: ProposedMove,
        reason: RejectReason,
    },

    ClockTick {
        white: u64,
        black: u64,
    },

    GameOver {
        winner: Option<Side>,
        cause: OutcomeCause,
        description: String,
    },

    Error {
        code: ErrorCode,
        message: String,
    },
}

/// Why a proposed move was not applied. Sent to the proposer only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The session has not started (or just ended).
    SessionNotActive,
    /// The proposer does not control the side to move.
    WrongTurn,
    /// The rules engine refused the move.
    IllegalMove,
    /// The rules engine could not answer; try again.
    TransientFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "bad_request",
        }
    }
}
