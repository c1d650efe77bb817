//! Checkers (draughts) on an 8×8 board with forced captures and
//! multi-jump chains.

mod board;
mod eval;
mod rules;

pub use board::{forward, promotion_row, CheckersPiece, CheckersPosition, CheckersSnapshot};
pub use eval::{CheckersEvaluator, KING_VALUE, MAN_VALUE};
pub use rules::{captures_from, CheckersMove, CheckersRules};
