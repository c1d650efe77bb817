//! Chess position: piece placement, castling rights and side to move.
//!
//! Positions serialize as FEN strings. The en-passant field is accepted on
//! input but not tracked, and written back as `-`.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult, Side, SideMap, Square};

/// Standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Chess piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    fn from_fen_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// A piece of a given side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    #[must_use]
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }

    fn fen_char(self) -> char {
        let c = self.kind.fen_char();
        match self.side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }
}

/// Remaining castling rights of one side. Rights are only ever revoked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        kingside: true,
        queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        kingside: false,
        queenside: false,
    };
}

/// Which rook a king castles with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// Home row of a side's back rank.
#[must_use]
pub const fn back_row(side: Side) -> i8 {
    match side {
        Side::White => 7,
        Side::Black => 0,
    }
}

/// A chess position.
///
/// `Copy`: search simulates on value copies, never on shared boards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ChessPosition {
    board: [Option<Piece>; 64],
    castling: SideMap<CastlingRights>,
    side_to_move: Side,
    halfmove_clock: u16,
    fullmove_number: u16,
}

impl ChessPosition {
    /// The standard starting position.
    #[must_use]
    pub fn start() -> Self {
        Self::from_fen(START_FEN).expect("START_FEN is valid")
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[must_use]
    pub fn castling(&self, side: Side) -> CastlingRights {
        self.castling[side]
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Occupied squares with their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.board[sq.index()].map(|p| (sq, p)))
    }

    /// Square of `side`'s king.
    #[must_use]
    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.side == side && p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.board[sq.index()] = piece;
    }

    pub(crate) fn castling_mut(&mut self, side: Side) -> &mut CastlingRights {
        &mut self.castling[side]
    }

    pub(crate) fn finish_move(&mut self, reset_clock: bool) {
        self.halfmove_clock = if reset_clock { 0 } else { self.halfmove_clock.saturating_add(1) };
        if self.side_to_move == Side::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Parse a FEN string.
    ///
    /// Rejects boards that are not 8×8, sides without exactly one king,
    /// pawns on a back rank, castling rights without the king and rook on
    /// their home squares, and positions where the side not to move is in
    /// check.
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 2 || fields.len() > 6 {
            return Err(EngineError::malformed(format!(
                "FEN needs 2 to 6 fields, got {}",
                fields.len()
            )));
        }

        let mut board = [None; 64];
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(EngineError::malformed(format!("FEN board has {} ranks", ranks.len())));
        }
        for (row, rank) in ranks.iter().enumerate() {
            let mut col: i8 = 0;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(EngineError::malformed(format!("bad empty-square count '{c}'")));
                    }
                    col += skip as i8;
                } else {
                    let kind = PieceKind::from_fen_char(c)
                        .ok_or_else(|| EngineError::malformed(format!("unknown piece '{c}'")))?;
                    let side = if c.is_ascii_uppercase() { Side::White } else { Side::Black };
                    let sq = Square::at(row as i8, col)
                        .ok_or_else(|| {
                            EngineError::malformed(format!("rank {} overflows", 8 - row))
                        })?;
                    board[sq.index()] = Some(Piece::new(side, kind));
                    col += 1;
                }
                if col > 8 {
                    return Err(EngineError::malformed(format!("rank {} overflows", 8 - row)));
                }
            }
            if col != 8 {
                return Err(EngineError::malformed(format!("rank {} has {col} squares", 8 - row)));
            }
        }

        let side_to_move = match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(EngineError::malformed(format!("bad side to move '{other}'"))),
        };

        let mut castling = SideMap::with_value(CastlingRights::NONE);
        let castling_field = fields.get(2).copied().unwrap_or("-");
        if castling_field != "-" {
            for c in castling_field.chars() {
                match c {
                    'K' => castling[Side::White].kingside = true,
                    'Q' => castling[Side::White].queenside = true,
                    'k' => castling[Side::Black].kingside = true,
                    'q' => castling[Side::Black].queenside = true,
                    other => {
                        return Err(EngineError::malformed(format!(
                            "bad castling flag '{other}'"
                        )))
                    }
                }
            }
        }

        if let Some(&ep) = fields.get(3) {
            if ep != "-" && Square::from_algebraic(ep).is_none() {
                return Err(EngineError::malformed(format!("bad en-passant square '{ep}'")));
            }
        }

        let halfmove_clock = match fields.get(4) {
            Some(f) => f
                .parse()
                .map_err(|_| EngineError::malformed(format!("bad halfmove clock '{f}'")))?,
            None => 0,
        };
        let fullmove_number = match fields.get(5) {
            Some(f) => f
                .parse()
                .map_err(|_| EngineError::malformed(format!("bad fullmove number '{f}'")))?,
            None => 1,
        };

        let position = Self {
            board,
            castling,
            side_to_move,
            halfmove_clock,
            fullmove_number,
        };
        position.validate()?;
        Ok(position)
    }

    fn validate(&self) -> EngineResult<()> {
        for side in Side::ALL {
            let kings = self
                .pieces()
                .filter(|(_, p)| p.side == side && p.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(EngineError::malformed(format!("{side} has {kings} kings")));
            }

            let rights = self.castling[side];
            let row = back_row(side);
            let king_home = self.piece_at_rc(row, 4) == Some(Piece::new(side, PieceKind::King));
            let rook = Some(Piece::new(side, PieceKind::Rook));
            if rights.kingside && !(king_home && self.piece_at_rc(row, 7) == rook) {
                return Err(EngineError::malformed(format!(
                    "{side} kingside right without king and rook at home"
                )));
            }
            if rights.queenside && !(king_home && self.piece_at_rc(row, 0) == rook) {
                return Err(EngineError::malformed(format!(
                    "{side} queenside right without king and rook at home"
                )));
            }
        }

        if let Some((sq, _)) = self
            .pieces()
            .find(|(sq, p)| p.kind == PieceKind::Pawn && (sq.row() == 0 || sq.row() == 7))
        {
            return Err(EngineError::malformed(format!("pawn on back rank at {sq}")));
        }

        if super::rules::in_check(self, self.side_to_move.opponent()) {
            return Err(EngineError::malformed("the side not to move is in check"));
        }
        Ok(())
    }

    fn piece_at_rc(&self, row: i8, col: i8) -> Option<Piece> {
        Square::at(row, col).and_then(|sq| self.piece_at(sq))
    }

    /// Format as FEN.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for row in 0..8 {
            let mut empty = 0;
            for col in 0..8 {
                match self.piece_at_rc(row, col) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(if self.side_to_move == Side::White { 'w' } else { 'b' });
        out.push(' ');

        let mut flags = String::new();
        let (w, b) = (self.castling[Side::White], self.castling[Side::Black]);
        let flagged = [
            (w.kingside, 'K'),
            (w.queenside, 'Q'),
            (b.kingside, 'k'),
            (b.queenside, 'q'),
        ];
        for (set, c) in flagged {
            if set {
                flags.push(c);
            }
        }
        if flags.is_empty() {
            flags.push('-');
        }
        out.push_str(&flags);
        out.push_str(&format!(" - {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}

impl std::fmt::Debug for ChessPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChessPosition({})", self.to_fen())
    }
}

impl std::fmt::Display for ChessPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_fen())
    }
}

impl From<ChessPosition> for String {
    fn from(position: ChessPosition) -> Self {
        position.to_fen()
    }
}

impl TryFrom<String> for ChessPosition {
    type Error = EngineError;

    fn try_from(fen: String) -> Result<Self, Self::Error> {
        ChessPosition::from_fen(&fen)
    }
}

impl std::str::FromStr for ChessPosition {
    type Err = EngineError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        ChessPosition::from_fen(fen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position() {
        let pos = ChessPosition::start();
        assert_eq!(pos.side_to_move(), Side::White);
        assert_eq!(pos.pieces().count(), 32);
        assert_eq!(pos.castling(Side::White), CastlingRights::ALL);
        assert_eq!(pos.king_square(Side::White), Square::from_algebraic("e1"));
        assert_eq!(pos.king_square(Side::Black), Square::from_algebraic("e8"));
        assert_eq!(
            pos.piece_at(Square::from_algebraic("d8").unwrap()),
            Some(Piece::new(Side::Black, PieceKind::Queen))
        );
    }

    #[test]
    fn test_fen_round_trip() {
        for fen in [
            START_FEN,
            "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 3 17",
            "8/8/4k3/8/8/3K4/8/8 w - - 0 1",
        ] {
            assert_eq!(ChessPosition::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn test_short_fen_defaults() {
        let pos = ChessPosition::from_fen("4k3/8/8/8/8/8/8/4K3 b").unwrap();
        assert_eq!(pos.side_to_move(), Side::Black);
        assert_eq!(pos.castling(Side::White), CastlingRights::NONE);
        assert_eq!(pos.fullmove_number(), 1);
    }

    #[test]
    fn test_malformed_fens() {
        let bad = [
            "",
            "8/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
            "4k3/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K2Z w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w K - 0 1",
            "P3k3/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - z9 0 1",
            // Black to move is fine; White to move with Black in check is not.
            "4k3/4Q3/8/8/8/8/8/4K3 w - - 0 1",
        ];
        for fen in bad {
            assert!(
                matches!(ChessPosition::from_fen(fen), Err(EngineError::MalformedPosition(_))),
                "accepted {fen:?}"
            );
        }
    }

    #[test]
    fn test_serde_as_fen_string() {
        let pos = ChessPosition::start();
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, format!("\"{START_FEN}\""));
        let back: ChessPosition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos);

        assert!(serde_json::from_str::<ChessPosition>("\"not a fen\"").is_err());
    }
}
