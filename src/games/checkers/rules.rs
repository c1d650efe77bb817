//! Checkers move generation and capture chains.
//!
//! - Captures are forced: when any capture exists, only captures are legal
//! - Men step forward but capture in all four diagonal directions
//! - Kings step or capture one square diagonally in any direction
//! - A capture that can be followed by another from the landing square
//!   keeps the turn with that piece (`must_continue_from`)
//! - Reaching the far row crowns a man and ends the chain
//! - A side with no legal move loses

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EngineConfig, GameRng, Side, Square};
use crate::rules::{GameKind, GameResult, GameStatus, Highlight, OpponentPolicy, RulesEngine};
use crate::search;

use super::board::{forward, promotion_row, CheckersPiece, CheckersPosition};
use super::eval::CheckersEvaluator;

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

type MoveBuf = SmallVec<[CheckersMove; 16]>;

/// A single step or a single jump. A multi-capture is a sequence of jumps,
/// each one a separate move by the same side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckersMove {
    pub from: Square,
    pub to: Square,
    /// Square of the jumped piece.
    #[serde(default)]
    pub captured: Option<Square>,
}

impl CheckersMove {
    #[must_use]
    pub fn step(from: Square, to: Square) -> Self {
        Self { from, to, captured: None }
    }

    #[must_use]
    pub fn jump(from: Square, over: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captured: Some(over),
        }
    }

    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

fn directions(piece: CheckersPiece) -> impl Iterator<Item = (i8, i8)> {
    let fwd = forward(piece.side);
    DIAGONALS
        .into_iter()
        .filter(move |&(dr, _)| piece.king || dr == fwd)
}

fn jumps_from(position: &CheckersPosition, from: Square, piece: CheckersPiece, out: &mut MoveBuf) {
    for (dr, dc) in DIAGONALS {
        let (Some(over), Some(to)) = (from.offset(dr, dc), from.offset(2 * dr, 2 * dc)) else {
            continue;
        };
        let enemy = position.piece_at(over).is_some_and(|p| p.side != piece.side);
        if enemy && position.piece_at(to).is_none() {
            out.push(CheckersMove::jump(from, over, to));
        }
    }
}

fn steps_from(position: &CheckersPosition, from: Square, piece: CheckersPiece, out: &mut MoveBuf) {
    for (dr, dc) in directions(piece) {
        if let Some(to) = from.offset(dr, dc) {
            if position.piece_at(to).is_none() {
                out.push(CheckersMove::step(from, to));
            }
        }
    }
}

/// Captures available to the piece on `from`.
#[must_use]
pub fn captures_from(position: &CheckersPosition, from: Square) -> Vec<CheckersMove> {
    let mut out = MoveBuf::new();
    if let Some(piece) = position.piece_at(from) {
        jumps_from(position, from, piece, &mut out);
    }
    out.into_vec()
}

/// Rules of checkers.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckersRules;

impl RulesEngine for CheckersRules {
    type Position = CheckersPosition;
    type Move = CheckersMove;

    fn kind(&self) -> GameKind {
        GameKind::Checkers
    }

    fn side_to_move(&self, position: &CheckersPosition) -> Side {
        position.side_to_move()
    }

    fn legal_moves(&self, position: &CheckersPosition) -> Vec<CheckersMove> {
        if let Some(sq) = position.must_continue_from() {
            return captures_from(position, sq);
        }

        let side = position.side_to_move();
        let mut captures = MoveBuf::new();
        let mut steps = MoveBuf::new();
        for (from, piece) in position.pieces().filter(|(_, p)| p.side == side) {
            jumps_from(position, from, piece, &mut captures);
            if captures.is_empty() {
                steps_from(position, from, piece, &mut steps);
            }
        }

        if captures.is_empty() {
            steps.into_vec()
        } else {
            captures.into_vec()
        }
    }

    /// Jump moves submitted without `captured` are resolved from the jump
    /// geometry.
    fn apply_move(&self, position: &CheckersPosition, mv: &CheckersMove) -> CheckersPosition {
        let mut next = *position;
        let Some(piece) = position.piece_at(mv.from) else {
            unreachable!("checkers move from empty square {}", mv.from);
        };

        let captured = mv.captured.or_else(|| {
            let (dr, dc) = (mv.to.row() - mv.from.row(), mv.to.col() - mv.from.col());
            if dr.abs() == 2 && dc.abs() == 2 {
                mv.from.offset(dr / 2, dc / 2)
            } else {
                None
            }
        });

        let crowned = !piece.king && mv.to.row() == promotion_row(piece.side);
        next.set(mv.from, None);
        next.set(mv.to, Some(CheckersPiece { king: piece.king || crowned, ..piece }));
        if let Some(over) = captured {
            next.set(over, None);
        }

        let chain_continues =
            captured.is_some() && !crowned && !captures_from(&next, mv.to).is_empty();
        if chain_continues {
            next.set_turn(piece.side, Some(mv.to));
        } else {
            next.set_turn(piece.side.opponent(), None);
        }
        next
    }

    fn status(&self, position: &CheckersPosition) -> GameStatus {
        if self.legal_moves(position).is_empty() {
            GameStatus::NoLegalMove
        } else {
            GameStatus::Ongoing
        }
    }

    fn result(&self, position: &CheckersPosition) -> Option<GameResult> {
        match self.status(position) {
            GameStatus::NoLegalMove => Some(GameResult::Winner(position.side_to_move().opponent())),
            _ => None,
        }
    }

    fn designates(&self, legal: &CheckersMove, submitted: &CheckersMove) -> bool {
        legal.from == submitted.from && legal.to == submitted.to
    }

    fn continues_turn(&self, after: &CheckersPosition) -> bool {
        after.must_continue_from().is_some()
    }

    fn highlight(&self, mv: &CheckersMove) -> Option<Highlight> {
        Some(Highlight { from: mv.from, to: mv.to })
    }
}

impl OpponentPolicy for CheckersRules {
    fn select_move(
        &self,
        position: &CheckersPosition,
        config: &EngineConfig,
        rng: &mut GameRng,
    ) -> Option<CheckersMove> {
        let depth = config.checkers_depths.depth(config.difficulty);
        search::choose_move(self, &CheckersEvaluator, position, depth, config, rng)
    }
}
