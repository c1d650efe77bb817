//! Checkers position.
//!
//! Pieces stand on dark squares only. White starts on rows 5-7 and moves
//! toward row 0; Black starts on rows 0-2 and moves toward row 7.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult, Side, Square, BOARD_SIZE};

/// A man or king of one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckersPiece {
    pub side: Side,
    #[serde(default)]
    pub king: bool,
}

impl CheckersPiece {
    #[must_use]
    pub const fn man(side: Side) -> Self {
        Self { side, king: false }
    }

    #[must_use]
    pub const fn king(side: Side) -> Self {
        Self { side, king: true }
    }
}

/// Row a side's men promote on.
#[must_use]
pub const fn promotion_row(side: Side) -> i8 {
    match side {
        Side::White => 0,
        Side::Black => BOARD_SIZE - 1,
    }
}

/// Row direction a side's men move in.
#[must_use]
pub const fn forward(side: Side) -> i8 {
    match side {
        Side::White => -1,
        Side::Black => 1,
    }
}

/// A checkers position.
///
/// `must_continue_from` is set while a capture chain is in progress: the
/// piece on that square must keep capturing and the turn has not passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "CheckersSnapshot", try_from = "CheckersSnapshot")]
pub struct CheckersPosition {
    board: [Option<CheckersPiece>; 64],
    side_to_move: Side,
    must_continue_from: Option<Square>,
}

impl CheckersPosition {
    /// Twelve men per side on the dark squares, White to move.
    #[must_use]
    pub fn start() -> Self {
        let mut board = [None; 64];
        for sq in Square::all().filter(|sq| sq.is_dark()) {
            board[sq.index()] = match sq.row() {
                0..=2 => Some(CheckersPiece::man(Side::Black)),
                5..=7 => Some(CheckersPiece::man(Side::White)),
                _ => None,
            };
        }
        Self {
            board,
            side_to_move: Side::White,
            must_continue_from: None,
        }
    }

    /// An empty board with `side_to_move` to play, for setting up positions.
    #[must_use]
    pub fn empty(side_to_move: Side) -> Self {
        Self {
            board: [None; 64],
            side_to_move,
            must_continue_from: None,
        }
    }

    /// Place a piece, builder style.
    ///
    /// # Panics
    ///
    /// Panics if `sq` is a light square.
    #[must_use]
    pub fn with_piece(mut self, sq: Square, piece: CheckersPiece) -> Self {
        assert!(sq.is_dark(), "checkers pieces stand on dark squares, not {sq}");
        self.board[sq.index()] = Some(piece);
        self
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<CheckersPiece> {
        self.board[sq.index()]
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[must_use]
    pub fn must_continue_from(&self) -> Option<Square> {
        self.must_continue_from
    }

    /// Occupied squares with their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, CheckersPiece)> + '_ {
        Square::all().filter_map(move |sq| self.board[sq.index()].map(|p| (sq, p)))
    }

    /// Number of pieces `side` has left.
    #[must_use]
    pub fn count(&self, side: Side) -> usize {
        self.pieces().filter(|(_, p)| p.side == side).count()
    }

    pub(crate) fn set(&mut self, sq: Square, piece: Option<CheckersPiece>) {
        self.board[sq.index()] = piece;
    }

    pub(crate) fn set_turn(&mut self, side: Side, continue_from: Option<Square>) {
        self.side_to_move = side;
        self.must_continue_from = continue_from;
    }

    /// Nested-array snapshot, row 0 first.
    #[must_use]
    pub fn snapshot(&self) -> CheckersSnapshot {
        let board = (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| Square::at(row, col).and_then(|sq| self.piece_at(sq)))
                    .collect()
            })
            .collect();
        CheckersSnapshot {
            board,
            side_to_move: self.side_to_move,
            must_continue_from: self.must_continue_from,
        }
    }

    /// Rebuild a position from a snapshot.
    ///
    /// Rejects boards that are not 8×8, pieces on light squares, men
    /// standing on their promotion row, and a continuation square that does
    /// not hold a piece of the side to move or whose piece has no capture.
    pub fn from_snapshot(snapshot: &CheckersSnapshot) -> EngineResult<Self> {
        if snapshot.board.len() != BOARD_SIZE as usize {
            return Err(EngineError::malformed(format!(
                "checkers board has {} rows",
                snapshot.board.len()
            )));
        }
        let mut board = [None; 64];
        for (row, cells) in snapshot.board.iter().enumerate() {
            if cells.len() != BOARD_SIZE as usize {
                return Err(EngineError::malformed(format!(
                    "checkers row {row} has {} cells",
                    cells.len()
                )));
            }
            for (col, cell) in cells.iter().enumerate() {
                let Some(piece) = cell else { continue };
                let sq = Square::at(row as i8, col as i8)
                    .ok_or_else(|| EngineError::malformed(format!("bad square ({row}, {col})")))?;
                if !sq.is_dark() {
                    return Err(EngineError::malformed(format!("piece on light square {sq}")));
                }
                if !piece.king && sq.row() == promotion_row(piece.side) {
                    return Err(EngineError::malformed(format!(
                        "uncrowned {} man on {sq}",
                        piece.side
                    )));
                }
                board[sq.index()] = Some(*piece);
            }
        }

        if let Some(sq) = snapshot.must_continue_from {
            match board[sq.index()] {
                Some(piece) if piece.side == snapshot.side_to_move => {}
                _ => {
                    return Err(EngineError::malformed(format!(
                        "capture chain square {sq} holds no {} piece",
                        snapshot.side_to_move
                    )))
                }
            }
        }

        let position = Self {
            board,
            side_to_move: snapshot.side_to_move,
            must_continue_from: snapshot.must_continue_from,
        };
        if let Some(sq) = position.must_continue_from {
            if super::rules::captures_from(&position, sq).is_empty() {
                return Err(EngineError::malformed(format!(
                    "capture chain square {sq} has no capture left"
                )));
            }
        }
        Ok(position)
    }
}

impl Default for CheckersPosition {
    fn default() -> Self {
        Self::start()
    }
}

/// Serialized form of a checkers position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckersSnapshot {
    pub board: Vec<Vec<Option<CheckersPiece>>>,
    pub side_to_move: Side,
    #[serde(default)]
    pub must_continue_from: Option<Square>,
}

impl From<CheckersPosition> for CheckersSnapshot {
    fn from(position: CheckersPosition) -> Self {
        position.snapshot()
    }
}

impl TryFrom<CheckersSnapshot> for CheckersPosition {
    type Error = EngineError;

    fn try_from(snapshot: CheckersSnapshot) -> Result<Self, Self::Error> {
        CheckersPosition::from_snapshot(&snapshot)
    }
}
