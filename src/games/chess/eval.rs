//! Static chess evaluation: material plus piece-square bonuses.

use crate::core::Side;
use crate::search::Evaluator;

use super::board::{ChessPosition, PieceKind};
use super::rules::ChessRules;

/// Pawn bonuses from White's point of view, row 0 = rank 8.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

/// Knights prefer the centre.
#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

/// Material value in centipawns.
#[must_use]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

/// Material and positional evaluator for chess.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChessEvaluator;

impl ChessEvaluator {
    /// Score from White's point of view.
    #[must_use]
    pub fn white_score(position: &ChessPosition) -> i32 {
        position
            .pieces()
            .map(|(sq, piece)| {
                // Tables are written for White; Black reads them mirrored.
                let row = match piece.side {
                    Side::White => sq.row(),
                    Side::Black => 7 - sq.row(),
                };
                let idx = row as usize * 8 + sq.col() as usize;
                let bonus = match piece.kind {
                    PieceKind::Pawn => PAWN_TABLE[idx],
                    PieceKind::Knight => KNIGHT_TABLE[idx],
                    _ => 0,
                };
                (piece_value(piece.kind) + bonus) * piece.side.sign(Side::White)
            })
            .sum()
    }
}

impl Evaluator<ChessRules> for ChessEvaluator {
    fn evaluate(&self, position: &ChessPosition, perspective: Side) -> i32 {
        Self::white_score(position) * Side::White.sign(perspective)
    }
}
