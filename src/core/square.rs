//! Squares of an 8×8 board, shared by chess and checkers.
//!
//! Row 0 is the top of the board as seen by White (chess rank 8), column 0
//! is the a-file. Indices run row-major, `row * 8 + col`.

use serde::{Deserialize, Serialize};

use super::EngineError;

/// Board edge length.
pub const BOARD_SIZE: i8 = 8;

/// A square on an 8×8 board.
///
/// Serialized as its index. Decoding rejects indices past the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct Square(u8);

impl Square {
    /// Square at `(row, col)`, or `None` off the board.
    #[must_use]
    pub fn at(row: i8, col: i8) -> Option<Self> {
        if (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col) {
            Some(Self((row * BOARD_SIZE + col) as u8))
        } else {
            None
        }
    }

    /// Square from a raw index in `0..64`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < 64).then_some(Self(index as u8))
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn row(self) -> i8 {
        (self.0 / 8) as i8
    }

    #[must_use]
    pub const fn col(self) -> i8 {
        (self.0 % 8) as i8
    }

    /// The square displaced by `(dr, dc)`, if it stays on the board.
    #[must_use]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        Self::at(self.row() + dr, self.col() + dc)
    }

    /// Dark squares carry checkers pieces.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    /// Parse algebraic notation such as `e4`.
    #[must_use]
    pub fn from_algebraic(name: &str) -> Option<Self> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        let col = (file - b'a') as i8;
        let row = BOARD_SIZE - (rank - b'0') as i8;
        Self::at(row, col)
    }
}

impl From<Square> for u8 {
    fn from(sq: Square) -> Self {
        sq.0
    }
}

impl TryFrom<u8> for Square {
    type Error = EngineError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Square::from_index(usize::from(index))
            .ok_or_else(|| EngineError::malformed(format!("square index {index} is off the board")))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = (b'a' + self.col() as u8) as char;
        let rank = BOARD_SIZE - self.row();
        write!(f, "{file}{rank}")
    }
}
