//! Error types for the engine's mutating entry points.
//!
//! Running out of legal moves is not an error: it surfaces as a
//! `GameStatus` or a `NoMove` outcome instead.

use super::side::Side;

/// Errors surfaced to callers of the engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The submitted move is not among the legal moves of the position.
    #[error("illegal move: {reason}")]
    IllegalMove { reason: String },

    /// A side tried to move while it was not its turn.
    #[error("{mover} tried to move but it is {expected}'s turn")]
    OutOfTurn { mover: Side, expected: Side },

    /// The match has already reached a terminal state.
    #[error("the game is already over")]
    GameOver,

    /// A persisted or received position could not be decoded.
    #[error("malformed position: {0}")]
    MalformedPosition(String),

    /// An opponent computation was started against a position that is no
    /// longer current.
    #[error("stale opponent computation (ticket generation {ticket}, current {current})")]
    StaleComputation { ticket: u64, current: u64 },

    /// Configuration values that cannot drive an opponent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub(crate) fn illegal(reason: impl Into<String>) -> Self {
        EngineError::IllegalMove {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        EngineError::MalformedPosition(reason.into())
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
