//! Static checkers evaluation.

use crate::core::Side;
use crate::search::Evaluator;

use super::board::{promotion_row, CheckersPosition};
use super::rules::CheckersRules;

pub const MAN_VALUE: i32 = 10;
pub const KING_VALUE: i32 = 50;

/// Material plus one point per row a man has advanced toward its crowning
/// row.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckersEvaluator;

impl Evaluator<CheckersRules> for CheckersEvaluator {
    fn evaluate(&self, position: &CheckersPosition, perspective: Side) -> i32 {
        position
            .pieces()
            .map(|(sq, piece)| {
                let value = if piece.king {
                    KING_VALUE
                } else {
                    // Men start up to 7 rows from their crowning row.
                    let remaining = i32::from((promotion_row(piece.side) - sq.row()).abs());
                    MAN_VALUE + (7 - remaining)
                };
                value * piece.side.sign(perspective)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Square;
    use crate::games::checkers::CheckersPiece;

    #[test]
    fn test_start_is_balanced() {
        let pos = CheckersPosition::start();
        assert_eq!(CheckersEvaluator.evaluate(&pos, Side::White), 0);
    }

    #[test]
    fn test_material_and_advancement() {
        let pos = CheckersPosition::empty(Side::White)
            .with_piece(Square::at(7, 0).unwrap(), CheckersPiece::man(Side::White))
            .with_piece(Square::at(1, 0).unwrap(), CheckersPiece::man(Side::White))
            .with_piece(Square::at(4, 1).unwrap(), CheckersPiece::king(Side::Black));
        // 10 + 0, 10 + 6, minus a king
        assert_eq!(CheckersEvaluator.evaluate(&pos, Side::White), 26 - 50);
        assert_eq!(CheckersEvaluator.evaluate(&pos, Side::Black), 50 - 26);
    }
}
