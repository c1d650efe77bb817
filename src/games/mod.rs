//! Game implementations and kind-tagged dispatch.
//!
//! Each game module is usable on its own through its `RulesEngine`
//! implementation. `AnyGame` wraps all four behind one `RulesEngine` so a
//! caller that only knows the game kind at runtime (a persisted match, a
//! lobby selection) can drive any of them through the same entry points.

pub mod cards;
pub mod checkers;
pub mod chess;
pub mod domino;

use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, GameRng, Side};
use crate::rules::{GameKind, GameResult, GameStatus, Highlight, OpponentPolicy, RulesEngine};

use cards::{CardBattlePosition, CardBattleRules, CardMove};
use checkers::{CheckersMove, CheckersPosition, CheckersRules};
use chess::{ChessMove, ChessPosition, ChessRules};
use domino::{DominoMove, DominoPosition, DominoRules};

/// A position of any game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnyPosition {
    Chess(ChessPosition),
    Checkers(CheckersPosition),
    Domino(DominoPosition),
    CardBattle(CardBattlePosition),
}

impl AnyPosition {
    /// Fresh match of `kind`. Tiles and cards are dealt from `rng`.
    #[must_use]
    pub fn new_game(kind: GameKind, rng: &mut GameRng) -> Self {
        match kind {
            GameKind::Chess => AnyPosition::Chess(ChessPosition::start()),
            GameKind::Checkers => AnyPosition::Checkers(CheckersPosition::start()),
            GameKind::Domino => AnyPosition::Domino(DominoPosition::deal(rng)),
            GameKind::CardBattle => AnyPosition::CardBattle(CardBattlePosition::deal(rng)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> GameKind {
        match self {
            AnyPosition::Chess(_) => GameKind::Chess,
            AnyPosition::Checkers(_) => GameKind::Checkers,
            AnyPosition::Domino(_) => GameKind::Domino,
            AnyPosition::CardBattle(_) => GameKind::CardBattle,
        }
    }
}

/// A move of any game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnyMove {
    Chess(ChessMove),
    Checkers(CheckersMove),
    Domino(DominoMove),
    CardBattle(CardMove),
}

impl AnyMove {
    #[must_use]
    pub fn kind(&self) -> GameKind {
        match self {
            AnyMove::Chess(_) => GameKind::Chess,
            AnyMove::Checkers(_) => GameKind::Checkers,
            AnyMove::Domino(_) => GameKind::Domino,
            AnyMove::CardBattle(_) => GameKind::CardBattle,
        }
    }
}

/// Rules of whichever game a position belongs to.
///
/// Moves of a different game than the position never designate a legal
/// move, so they are rejected as illegal by the turn layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnyGame {
    kind: GameKind,
}

impl AnyGame {
    #[must_use]
    pub fn new(kind: GameKind) -> Self {
        Self { kind }
    }

    /// Rules matching a position's game.
    #[must_use]
    pub fn for_position(position: &AnyPosition) -> Self {
        Self::new(position.kind())
    }
}

fn wrap<M>(moves: Vec<M>, f: impl Fn(M) -> AnyMove) -> Vec<AnyMove> {
    moves.into_iter().map(f).collect()
}

impl RulesEngine for AnyGame {
    type Position = AnyPosition;
    type Move = AnyMove;

    fn kind(&self) -> GameKind {
        self.kind
    }

    fn side_to_move(&self, position: &AnyPosition) -> Side {
        match position {
            AnyPosition::Chess(p) => ChessRules.side_to_move(p),
            AnyPosition::Checkers(p) => CheckersRules.side_to_move(p),
            AnyPosition::Domino(p) => DominoRules.side_to_move(p),
            AnyPosition::CardBattle(p) => CardBattleRules.side_to_move(p),
        }
    }

    fn legal_moves(&self, position: &AnyPosition) -> Vec<AnyMove> {
        match position {
            AnyPosition::Chess(p) => wrap(ChessRules.legal_moves(p), AnyMove::Chess),
            AnyPosition::Checkers(p) => wrap(CheckersRules.legal_moves(p), AnyMove::Checkers),
            AnyPosition::Domino(p) => wrap(DominoRules.legal_moves(p), AnyMove::Domino),
            AnyPosition::CardBattle(p) => wrap(CardBattleRules.legal_moves(p), AnyMove::CardBattle),
        }
    }

    fn apply_move(&self, position: &AnyPosition, mv: &AnyMove) -> AnyPosition {
        match (position, mv) {
            (AnyPosition::Chess(p), AnyMove::Chess(m)) => {
                AnyPosition::Chess(ChessRules.apply_move(p, m))
            }
            (AnyPosition::Checkers(p), AnyMove::Checkers(m)) => {
                AnyPosition::Checkers(CheckersRules.apply_move(p, m))
            }
            (AnyPosition::Domino(p), AnyMove::Domino(m)) => {
                AnyPosition::Domino(DominoRules.apply_move(p, m))
            }
            (AnyPosition::CardBattle(p), AnyMove::CardBattle(m)) => {
                AnyPosition::CardBattle(CardBattleRules.apply_move(p, m))
            }
            (p, m) => unreachable!("{} move applied to a {} position", m.kind(), p.kind()),
        }
    }

    fn status(&self, position: &AnyPosition) -> GameStatus {
        match position {
            AnyPosition::Chess(p) => ChessRules.status(p),
            AnyPosition::Checkers(p) => CheckersRules.status(p),
            AnyPosition::Domino(p) => DominoRules.status(p),
            AnyPosition::CardBattle(p) => CardBattleRules.status(p),
        }
    }

    fn result(&self, position: &AnyPosition) -> Option<GameResult> {
        match position {
            AnyPosition::Chess(p) => ChessRules.result(p),
            AnyPosition::Checkers(p) => CheckersRules.result(p),
            AnyPosition::Domino(p) => DominoRules.result(p),
            AnyPosition::CardBattle(p) => CardBattleRules.result(p),
        }
    }

    fn designates(&self, legal: &AnyMove, submitted: &AnyMove) -> bool {
        match (legal, submitted) {
            (AnyMove::Chess(a), AnyMove::Chess(b)) => ChessRules.designates(a, b),
            (AnyMove::Checkers(a), AnyMove::Checkers(b)) => CheckersRules.designates(a, b),
            (AnyMove::Domino(a), AnyMove::Domino(b)) => DominoRules.designates(a, b),
            (AnyMove::CardBattle(a), AnyMove::CardBattle(b)) => CardBattleRules.designates(a, b),
            _ => false,
        }
    }

    fn continues_turn(&self, after: &AnyPosition) -> bool {
        match after {
            AnyPosition::Checkers(p) => CheckersRules.continues_turn(p),
            _ => false,
        }
    }

    fn forced_pass(&self, position: &AnyPosition) -> Option<AnyMove> {
        match position {
            AnyPosition::Domino(p) => DominoRules.forced_pass(p).map(AnyMove::Domino),
            _ => None,
        }
    }

    fn highlight(&self, mv: &AnyMove) -> Option<Highlight> {
        match mv {
            AnyMove::Chess(m) => ChessRules.highlight(m),
            AnyMove::Checkers(m) => CheckersRules.highlight(m),
            AnyMove::Domino(_) | AnyMove::CardBattle(_) => None,
        }
    }
}

impl OpponentPolicy for AnyGame {
    fn select_move(
        &self,
        position: &AnyPosition,
        config: &EngineConfig,
        rng: &mut GameRng,
    ) -> Option<AnyMove> {
        match position {
            AnyPosition::Chess(p) => ChessRules.select_move(p, config, rng).map(AnyMove::Chess),
            AnyPosition::Checkers(p) => {
                CheckersRules.select_move(p, config, rng).map(AnyMove::Checkers)
            }
            AnyPosition::Domino(p) => DominoRules.select_move(p, config, rng).map(AnyMove::Domino),
            AnyPosition::CardBattle(p) => {
                CardBattleRules.select_move(p, config, rng).map(AnyMove::CardBattle)
            }
        }
    }
}
