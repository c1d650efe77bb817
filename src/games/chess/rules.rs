//! Chess move generation, legality and terminal detection.
//!
//! Moves are generated pseudo-legally per piece, then each candidate is
//! applied to a copy of the position and kept only if the mover's king is
//! not attacked afterwards. Pawns always promote to a queen. En passant and
//! the repetition and fifty-move draws are not part of these rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EngineConfig, GameRng, Side, Square};
use crate::rules::{GameKind, GameResult, GameStatus, Highlight, OpponentPolicy, RulesEngine};
use crate::search;

use super::board::{back_row, CastleSide, CastlingRights, ChessPosition, Piece, PieceKind};
use super::eval::ChessEvaluator;

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const QUEEN_DIRS: [(i8, i8); 8] = KING_STEPS;

type MoveBuf = SmallVec<[ChessMove; 64]>;

/// A chess move.
///
/// Callers may submit a bare `from`/`to` move; the flags are filled in by
/// the generator and matched by squares only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    /// A pawn reaches the last rank and becomes a queen.
    #[serde(default)]
    pub promotion: bool,
    /// The king castles with the given rook.
    #[serde(default)]
    pub castle: Option<CastleSide>,
    /// An enemy piece stands on `to`.
    #[serde(default)]
    pub capture: bool,
}

impl ChessMove {
    /// A bare move between two squares.
    #[must_use]
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: false,
            castle: None,
            capture: false,
        }
    }

    /// Parse coordinate notation such as `e2e4` or `e7e8q`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return None;
        }
        let from = Square::from_algebraic(&text[0..2])?;
        let to = Square::from_algebraic(&text[2..4])?;
        let mut mv = Self::new(from, to);
        match text.get(4..) {
            Some("") | None => {}
            Some("q") | Some("Q") => mv.promotion = true,
            Some(_) => return None,
        }
        Some(mv)
    }
}

impl std::fmt::Display for ChessMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if self.promotion {
            f.write_str("q")?;
        }
        Ok(())
    }
}

/// Forward row direction of a side's pawns.
const fn pawn_dir(side: Side) -> i8 {
    match side {
        Side::White => -1,
        Side::Black => 1,
    }
}

/// Whether `target` is attacked by any piece of `by`.
#[must_use]
pub fn is_attacked(position: &ChessPosition, target: Square, by: Side) -> bool {
    let is = |sq: Option<Square>, kinds: &[PieceKind]| {
        sq.and_then(|s| position.piece_at(s))
            .is_some_and(|p| p.side == by && kinds.contains(&p.kind))
    };

    let back = -pawn_dir(by);
    if is(target.offset(back, -1), &[PieceKind::Pawn])
        || is(target.offset(back, 1), &[PieceKind::Pawn])
    {
        return true;
    }
    if KNIGHT_STEPS.iter().any(|&(dr, dc)| is(target.offset(dr, dc), &[PieceKind::Knight])) {
        return true;
    }
    if KING_STEPS.iter().any(|&(dr, dc)| is(target.offset(dr, dc), &[PieceKind::King])) {
        return true;
    }

    let slider_hits = |dirs: &[(i8, i8)], kinds: &[PieceKind]| {
        dirs.iter().any(|&(dr, dc)| {
            let mut cur = target.offset(dr, dc);
            while let Some(sq) = cur {
                if let Some(piece) = position.piece_at(sq) {
                    return piece.side == by && kinds.contains(&piece.kind);
                }
                cur = sq.offset(dr, dc);
            }
            false
        })
    };
    slider_hits(&ROOK_DIRS, &[PieceKind::Rook, PieceKind::Queen])
        || slider_hits(&BISHOP_DIRS, &[PieceKind::Bishop, PieceKind::Queen])
}

/// Whether `side`'s king is attacked.
///
/// # Panics
///
/// Validated positions always hold both kings; a missing king is a bug.
#[must_use]
pub fn in_check(position: &ChessPosition, side: Side) -> bool {
    match position.king_square(side) {
        Some(king) => is_attacked(position, king, side.opponent()),
        None => unreachable!("{side} king missing from a validated position"),
    }
}

fn push_target(
    position: &ChessPosition,
    side: Side,
    from: Square,
    to: Square,
    out: &mut MoveBuf,
) -> bool {
    match position.piece_at(to) {
        None => {
            out.push(ChessMove::new(from, to));
            true
        }
        Some(p) if p.side != side => {
            out.push(ChessMove {
                capture: true,
                ..ChessMove::new(from, to)
            });
            false
        }
        Some(_) => false,
    }
}

fn pawn_moves(position: &ChessPosition, side: Side, from: Square, out: &mut MoveBuf) {
    let dir = pawn_dir(side);
    let last_row = back_row(side.opponent());
    let start_row = back_row(side) + dir;

    if let Some(one) = from.offset(dir, 0) {
        if position.piece_at(one).is_none() {
            out.push(ChessMove {
                promotion: one.row() == last_row,
                ..ChessMove::new(from, one)
            });
            if from.row() == start_row {
                if let Some(two) = one.offset(dir, 0) {
                    if position.piece_at(two).is_none() {
                        out.push(ChessMove::new(from, two));
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        let Some(to) = from.offset(dir, dc) else { continue };
        if position.piece_at(to).is_some_and(|p| p.side != side) {
            out.push(ChessMove {
                promotion: to.row() == last_row,
                capture: true,
                ..ChessMove::new(from, to)
            });
        }
    }
}

fn castling_moves(position: &ChessPosition, side: Side, out: &mut MoveBuf) {
    let row = back_row(side);
    let rights = position.castling(side);
    let enemy = side.opponent();
    let Some(king_from) = Square::at(row, 4) else { return };
    if position.piece_at(king_from) != Some(Piece::new(side, PieceKind::King)) {
        return;
    }

    // (right, rook column, squares that must be empty, squares the king uses)
    let options = [
        (rights.kingside, CastleSide::Kingside, 7, &[5, 6][..], &[4, 5, 6][..]),
        (rights.queenside, CastleSide::Queenside, 0, &[1, 2, 3][..], &[4, 3, 2][..]),
    ];
    for (allowed, castle, rook_col, empty_cols, king_path) in options {
        if !allowed {
            continue;
        }
        let rook_home = Square::at(row, rook_col).and_then(|sq| position.piece_at(sq));
        if rook_home != Some(Piece::new(side, PieceKind::Rook)) {
            continue;
        }
        let clear = empty_cols
            .iter()
            .all(|&c| Square::at(row, c).is_some_and(|sq| position.piece_at(sq).is_none()));
        let safe = king_path
            .iter()
            .all(|&c| Square::at(row, c).is_some_and(|sq| !is_attacked(position, sq, enemy)));
        if clear && safe {
            let to_col = if castle == CastleSide::Kingside { 6 } else { 2 };
            if let Some(to) = Square::at(row, to_col) {
                out.push(ChessMove {
                    castle: Some(castle),
                    ..ChessMove::new(king_from, to)
                });
            }
        }
    }
}

fn pseudo_moves(position: &ChessPosition) -> MoveBuf {
    let side = position.side_to_move();
    let mut out = MoveBuf::new();

    for (from, piece) in position.pieces().filter(|(_, p)| p.side == side) {
        match piece.kind {
            PieceKind::Pawn => pawn_moves(position, side, from, &mut out),
            PieceKind::Knight => {
                for (dr, dc) in KNIGHT_STEPS {
                    if let Some(to) = from.offset(dr, dc) {
                        push_target(position, side, from, to, &mut out);
                    }
                }
            }
            PieceKind::King => {
                for (dr, dc) in KING_STEPS {
                    if let Some(to) = from.offset(dr, dc) {
                        push_target(position, side, from, to, &mut out);
                    }
                }
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                let dirs: &[(i8, i8)] = match piece.kind {
                    PieceKind::Bishop => &BISHOP_DIRS,
                    PieceKind::Rook => &ROOK_DIRS,
                    _ => &QUEEN_DIRS,
                };
                for &(dr, dc) in dirs {
                    let mut cur = from.offset(dr, dc);
                    while let Some(to) = cur {
                        if !push_target(position, side, from, to, &mut out) {
                            break;
                        }
                        cur = to.offset(dr, dc);
                    }
                }
            }
        }
    }

    castling_moves(position, side, &mut out);
    out
}

/// Revoke the castling right tied to a rook corner, if `sq` is one.
fn revoke_corner(position: &mut ChessPosition, sq: Square) {
    for side in Side::ALL {
        if sq.row() != back_row(side) {
            continue;
        }
        let rights = position.castling_mut(side);
        match sq.col() {
            0 => rights.queenside = false,
            7 => rights.kingside = false,
            _ => {}
        }
    }
}

/// Play `mv` on a copy of `position`.
///
/// Castling is recognised from a two-column king move and promotion from a
/// pawn reaching the last rank, so bare `from`/`to` moves apply correctly.
///
/// # Panics
///
/// Panics if `mv.from` is empty; callers only apply generated moves.
#[must_use]
pub fn make_move(position: &ChessPosition, mv: &ChessMove) -> ChessPosition {
    let mut next = *position;
    let piece = position
        .piece_at(mv.from)
        .expect("make_move requires a piece on the source square");
    let captured = position.piece_at(mv.to);

    next.set(mv.from, None);
    let promoted = piece.kind == PieceKind::Pawn && mv.to.row() == back_row(piece.side.opponent());
    let placed = if promoted {
        Piece::new(piece.side, PieceKind::Queen)
    } else {
        piece
    };
    next.set(mv.to, Some(placed));

    if piece.kind == PieceKind::King {
        let shift = mv.to.col() - mv.from.col();
        if shift.abs() == 2 {
            let row = mv.from.row();
            let (rook_from, rook_to) = if shift > 0 { (7, 5) } else { (0, 3) };
            if let (Some(rf), Some(rt)) = (Square::at(row, rook_from), Square::at(row, rook_to)) {
                let rook = next.piece_at(rf);
                next.set(rf, None);
                next.set(rt, rook);
            }
        }
        *next.castling_mut(piece.side) = CastlingRights::NONE;
    }
    revoke_corner(&mut next, mv.from);
    revoke_corner(&mut next, mv.to);

    next.finish_move(piece.kind == PieceKind::Pawn || captured.is_some());
    next
}

/// Rules of chess.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChessRules;

impl RulesEngine for ChessRules {
    type Position = ChessPosition;
    type Move = ChessMove;

    fn kind(&self) -> GameKind {
        GameKind::Chess
    }

    fn side_to_move(&self, position: &ChessPosition) -> Side {
        position.side_to_move()
    }

    fn legal_moves(&self, position: &ChessPosition) -> Vec<ChessMove> {
        let side = position.side_to_move();
        pseudo_moves(position)
            .into_iter()
            .filter(|mv| !in_check(&make_move(position, mv), side))
            .collect()
    }

    fn apply_move(&self, position: &ChessPosition, mv: &ChessMove) -> ChessPosition {
        make_move(position, mv)
    }

    fn status(&self, position: &ChessPosition) -> GameStatus {
        let checked = in_check(position, position.side_to_move());
        let stuck = self.legal_moves(position).is_empty();
        match (stuck, checked) {
            (true, true) => GameStatus::Checkmate,
            (true, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::Check,
            (false, false) => GameStatus::Ongoing,
        }
    }

    fn result(&self, position: &ChessPosition) -> Option<GameResult> {
        match self.status(position) {
            GameStatus::Checkmate => Some(GameResult::Winner(position.side_to_move().opponent())),
            GameStatus::Stalemate => Some(GameResult::Draw),
            _ => None,
        }
    }

    fn designates(&self, legal: &ChessMove, submitted: &ChessMove) -> bool {
        legal.from == submitted.from && legal.to == submitted.to
    }

    fn highlight(&self, mv: &ChessMove) -> Option<Highlight> {
        Some(Highlight { from: mv.from, to: mv.to })
    }
}

impl OpponentPolicy for ChessRules {
    fn select_move(
        &self,
        position: &ChessPosition,
        config: &EngineConfig,
        rng: &mut GameRng,
    ) -> Option<ChessMove> {
        let depth = config.chess_depths.depth(config.difficulty);
        search::choose_move(self, &ChessEvaluator, position, depth, config, rng)
    }
}
