//! Move history records.
//!
//! Each accepted move (human or synthetic) is appended to the match history
//! together with who played it and its position in the sequence. The history
//! is a persistent vector so snapshots of a controller clone in O(1).

use serde::{Deserialize, Serialize};

use super::side::Side;

/// A recorded move with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord<M> {
    /// The side that played the move.
    pub mover: Side,

    /// The move played.
    pub mv: M,

    /// Zero-based index of this move in the match.
    pub sequence: u32,

    /// Whether the move was chosen by the synthetic opponent.
    pub synthetic: bool,
}

impl<M> MoveRecord<M> {
    #[must_use]
    pub fn new(mover: Side, mv: M, sequence: u32, synthetic: bool) -> Self {
        Self {
            mover,
            mv,
            sequence,
            synthetic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_record() {
        let record = MoveRecord::new(Side::Black, "e7e5", 1, true);
        assert_eq!(record.mover, Side::Black);
        assert_eq!(record.mv, "e7e5");
        assert_eq!(record.sequence, 1);
        assert!(record.synthetic);
    }

    #[test]
    fn test_move_record_serialization() {
        let record = MoveRecord::new(Side::White, 12u8, 0, false);
        let json = serde_json::to_string(&record).unwrap();
        let back: MoveRecord<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
