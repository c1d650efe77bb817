//! Chess.
//!
//! - Legal moves never leave the mover's king attacked
//! - Castling on both wings, with rights that are only ever revoked
//! - Pawns promote to a queen on the last rank
//! - Checkmate wins, stalemate draws
//!
//! En passant and the repetition and fifty-move draws are not implemented.

mod board;
mod eval;
mod rules;

pub use board::{back_row, CastleSide, CastlingRights, ChessPosition, Piece, PieceKind, START_FEN};
pub use eval::{piece_value, ChessEvaluator};
pub use rules::{in_check, is_attacked, make_move, ChessMove, ChessRules};
