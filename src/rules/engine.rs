//! Rules engine trait for game implementations.
//!
//! Each game implements `RulesEngine` to define:
//! - What moves are legal for the side to move
//! - How a move produces the next position
//! - Check, terminal and win/loss detection
//!
//! and `OpponentPolicy` to pick a move for the synthetic opponent.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, GameRng, Side, Square};

/// The supported games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Chess,
    Checkers,
    Domino,
    CardBattle,
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameKind::Chess => "chess",
            GameKind::Checkers => "checkers",
            GameKind::Domino => "domino",
            GameKind::CardBattle => "card_battle",
        };
        f.write_str(name)
    }
}

/// Status of a position for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Play continues.
    Ongoing,
    /// Play continues; the chess king of the side to move is attacked.
    Check,
    /// Chess: no legal move while in check.
    Checkmate,
    /// Chess: no legal move while not in check.
    Stalemate,
    /// Checkers: the side to move cannot move and loses. Dominoes: both
    /// sides passed in a row and the chain is blocked.
    NoLegalMove,
    /// Dominoes: a hand was emptied. Card battle: both hands are spent.
    HandExhausted,
}

impl GameStatus {
    /// Whether the match is over.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(Side),
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

/// Source and destination of a board move, for last-move highlighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub from: Square,
    pub to: Square,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: empty when the side to move cannot act
/// - `apply_move`: pure; the input position is never modified. Callers only
///   pass moves obtained from `legal_moves`
/// - `status`: `Ongoing`/`Check` while the game continues
pub trait RulesEngine {
    type Position: Clone + Debug;
    type Move: Clone + Debug + PartialEq;

    /// Which game these rules implement.
    fn kind(&self) -> GameKind;

    /// The side whose turn it is.
    fn side_to_move(&self, position: &Self::Position) -> Side;

    /// All legal moves for the side to move.
    fn legal_moves(&self, position: &Self::Position) -> Vec<Self::Move>;

    /// Produce the position after `mv`.
    fn apply_move(&self, position: &Self::Position, mv: &Self::Move) -> Self::Position;

    /// Terminal and check detection for the side to move.
    fn status(&self, position: &Self::Position) -> GameStatus;

    /// Winner of a terminal position, `None` while the game continues.
    fn result(&self, position: &Self::Position) -> Option<GameResult>;

    // === Provided Methods ===

    /// Legal moves for `side`; empty when it is not that side's turn.
    fn legal_moves_for(&self, position: &Self::Position, side: Side) -> Vec<Self::Move> {
        if self.side_to_move(position) == side {
            self.legal_moves(position)
        } else {
            Vec::new()
        }
    }

    /// Whether a submitted move designates the legal move `legal`.
    ///
    /// Board games override this to compare squares only, so callers need
    /// not reproduce flags such as capture or castling.
    fn designates(&self, legal: &Self::Move, submitted: &Self::Move) -> bool {
        legal == submitted
    }

    /// Whether the position after a move still belongs to the same turn
    /// (a checkers capture chain in progress).
    fn continues_turn(&self, _after: &Self::Position) -> bool {
        false
    }

    /// The pass the side to move is forced to make, if it has nothing else.
    fn forced_pass(&self, _position: &Self::Position) -> Option<Self::Move> {
        None
    }

    /// Squares to highlight for a move, for games played on a board.
    fn highlight(&self, _mv: &Self::Move) -> Option<Highlight> {
        None
    }
}

/// Move choice for the synthetic opponent.
pub trait OpponentPolicy: RulesEngine {
    /// Pick a move for the side to move.
    ///
    /// Returns `None` when the side has no legal move or must pass.
    fn select_move(
        &self,
        position: &Self::Position,
        config: &EngineConfig,
        rng: &mut GameRng,
    ) -> Option<Self::Move>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(Side::Black);
        assert!(!result.is_winner(Side::White));
        assert!(result.is_winner(Side::Black));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(Side::White));
        assert!(!draw.is_winner(Side::Black));
    }

    #[test]
    fn test_status_terminality() {
        assert!(!GameStatus::Ongoing.is_terminal());
        assert!(!GameStatus::Check.is_terminal());
        assert!(GameStatus::Checkmate.is_terminal());
        assert!(GameStatus::Stalemate.is_terminal());
        assert!(GameStatus::NoLegalMove.is_terminal());
        assert!(GameStatus::HandExhausted.is_terminal());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&GameKind::CardBattle).unwrap();
        assert_eq!(json, "\"card_battle\"");
        assert_eq!(GameKind::Checkers.to_string(), "checkers");
    }
}
