//! Two-player block dominoes.
//!
//! Each side holds seven tiles; the other fourteen stay face down and never
//! enter play. A tile is playable when one of its faces matches an open end
//! of the chain. A side that cannot play must pass. The game ends when a
//! hand is emptied, or after two consecutive passes (the chain is blocked),
//! in which case the lower pip total wins.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, EngineError, EngineResult, GameRng, Side, SideMap};
use crate::heuristic;
use crate::rules::{GameKind, GameResult, GameStatus, OpponentPolicy, RulesEngine};

use super::tile::{Tile, HAND_SIZE};

/// Where a tile joins the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainEnd {
    /// First tile of an empty chain.
    Start,
    Left,
    Right,
}

/// A domino move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominoMove {
    Play { tile: Tile, end: ChainEnd },
    Pass,
}

impl DominoMove {
    #[must_use]
    pub fn tile(&self) -> Option<Tile> {
        match self {
            DominoMove::Play { tile, .. } => Some(*tile),
            DominoMove::Pass => None,
        }
    }
}

/// Entry of the match log. Pass events keep the open ends at the time of
/// the pass, which tells the other side what the passer lacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominoEvent {
    Play { side: Side, tile: Tile, end: ChainEnd },
    Pass { side: Side, open_ends: Option<(u8, u8)> },
}

/// A dominoes position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DominoPositionData")]
pub struct DominoPosition {
    chain: Vector<Tile>,
    hands: SideMap<Vector<Tile>>,
    boneyard: Vector<Tile>,
    side_to_move: Side,
    history: Vector<DominoEvent>,
    consecutive_passes: u8,
}

impl DominoPosition {
    /// Shuffle a double-six set and deal seven tiles to each side. White
    /// plays first.
    #[must_use]
    pub fn deal(rng: &mut GameRng) -> Self {
        let mut tiles: Vec<Tile> = Tile::full_set().collect();
        rng.shuffle(&mut tiles);
        let white: Vector<Tile> = tiles[..HAND_SIZE].iter().copied().collect();
        let black: Vector<Tile> = tiles[HAND_SIZE..2 * HAND_SIZE].iter().copied().collect();
        let boneyard: Vector<Tile> = tiles[2 * HAND_SIZE..].iter().copied().collect();
        Self {
            chain: Vector::new(),
            hands: SideMap::new(|side| match side {
                Side::White => white.clone(),
                Side::Black => black.clone(),
            }),
            boneyard,
            side_to_move: Side::White,
            history: Vector::new(),
            consecutive_passes: 0,
        }
    }

    /// Position with explicit hands and chain. Tiles of the set that appear
    /// nowhere go to the boneyard.
    pub fn from_parts(
        chain: Vector<Tile>,
        hands: SideMap<Vector<Tile>>,
        side_to_move: Side,
    ) -> EngineResult<Self> {
        let placed: Vec<Tile> = chain
            .iter()
            .chain(hands[Side::White].iter())
            .chain(hands[Side::Black].iter())
            .copied()
            .collect();
        let boneyard = Tile::full_set()
            .filter(|t| !placed.iter().any(|p| p.same_as(*t)))
            .collect();
        Self::try_from(DominoPositionData {
            chain,
            hands,
            boneyard,
            side_to_move,
            history: Vector::new(),
            consecutive_passes: 0,
        })
    }

    #[must_use]
    pub fn chain(&self) -> &Vector<Tile> {
        &self.chain
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &Vector<Tile> {
        &self.hands[side]
    }

    #[must_use]
    pub fn boneyard(&self) -> &Vector<Tile> {
        &self.boneyard
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[must_use]
    pub fn history(&self) -> &Vector<DominoEvent> {
        &self.history
    }

    #[must_use]
    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    /// Left and right open values, `None` while the chain is empty.
    #[must_use]
    pub fn open_ends(&self) -> Option<(u8, u8)> {
        Some((self.chain.front()?.0, self.chain.back()?.1))
    }

    /// Pip total of a side's hand.
    #[must_use]
    pub fn pip_total(&self, side: Side) -> u32 {
        self.hands[side].iter().map(|t| t.pips()).sum()
    }

    /// The value a play leaves showing at the end it joins.
    #[must_use]
    pub fn exposed_after(&self, mv: &DominoMove) -> Option<u8> {
        let DominoMove::Play { tile, end } = *mv else { return None };
        let (left, right) = self.open_ends()?;
        match end {
            ChainEnd::Start => None,
            ChainEnd::Left => tile.other_face(left),
            ChainEnd::Right => tile.other_face(right),
        }
    }

    /// Pip values whose presence `side` ruled out by passing.
    pub fn passed_values(&self, side: Side) -> impl Iterator<Item = u8> + '_ {
        self.history.iter().flat_map(move |event| match event {
            DominoEvent::Pass {
                side: passer,
                open_ends: Some((l, r)),
            } if *passer == side => vec![*l, *r],
            _ => Vec::new(),
        })
    }

    fn is_over(&self) -> bool {
        self.hands.iter().any(|(_, hand)| hand.is_empty()) || self.consecutive_passes >= 2
    }

    fn plays(&self) -> Vec<DominoMove> {
        let hand = &self.hands[self.side_to_move];
        let Some((left, right)) = self.open_ends() else {
            return hand
                .iter()
                .map(|&tile| DominoMove::Play { tile, end: ChainEnd::Start })
                .collect();
        };

        let mut moves = Vec::new();
        for &tile in hand {
            if tile.has(left) {
                moves.push(DominoMove::Play { tile, end: ChainEnd::Left });
            }
            // Equal ends give identical chains either way.
            if tile.has(right) && left != right {
                moves.push(DominoMove::Play { tile, end: ChainEnd::Right });
            }
        }
        moves
    }
}

/// Wire form of a [`DominoPosition`], validated on the way in.
#[derive(Clone, Debug, Deserialize)]
struct DominoPositionData {
    chain: Vector<Tile>,
    hands: SideMap<Vector<Tile>>,
    boneyard: Vector<Tile>,
    side_to_move: Side,
    #[serde(default)]
    history: Vector<DominoEvent>,
    #[serde(default)]
    consecutive_passes: u8,
}

impl TryFrom<DominoPositionData> for DominoPosition {
    type Error = EngineError;

    /// Every tile of the set appears exactly once across chain, hands and
    /// boneyard, and neighbouring chain tiles match.
    fn try_from(data: DominoPositionData) -> Result<Self, Self::Error> {
        let all = data
            .chain
            .iter()
            .chain(data.hands[Side::White].iter())
            .chain(data.hands[Side::Black].iter())
            .chain(data.boneyard.iter());
        let mut seen = rustc_hash::FxHashSet::default();
        for tile in all {
            if !seen.insert(tile.normalized()) {
                return Err(EngineError::malformed(format!("tile {tile} appears twice")));
            }
        }
        if seen.len() != 28 {
            return Err(EngineError::malformed(format!("expected 28 tiles, found {}", seen.len())));
        }

        for (a, b) in data.chain.iter().zip(data.chain.iter().skip(1)) {
            if a.1 != b.0 {
                return Err(EngineError::malformed(format!("chain breaks between {a} and {b}")));
            }
        }
        if data.consecutive_passes > 2 {
            return Err(EngineError::malformed("more than two consecutive passes"));
        }

        Ok(Self {
            chain: data.chain,
            hands: data.hands,
            boneyard: data.boneyard,
            side_to_move: data.side_to_move,
            history: data.history,
            consecutive_passes: data.consecutive_passes,
        })
    }
}

/// Rules of dominoes.
#[derive(Clone, Copy, Debug, Default)]
pub struct DominoRules;

impl RulesEngine for DominoRules {
    type Position = DominoPosition;
    type Move = DominoMove;

    fn kind(&self) -> GameKind {
        GameKind::Domino
    }

    fn side_to_move(&self, position: &DominoPosition) -> Side {
        position.side_to_move
    }

    /// The matching plays, or a lone `Pass` when nothing matches.
    fn legal_moves(&self, position: &DominoPosition) -> Vec<DominoMove> {
        if position.is_over() {
            return Vec::new();
        }
        let plays = position.plays();
        if plays.is_empty() {
            vec![DominoMove::Pass]
        } else {
            plays
        }
    }

    fn apply_move(&self, position: &DominoPosition, mv: &DominoMove) -> DominoPosition {
        let mut next = position.clone();
        let side = position.side_to_move;

        match *mv {
            DominoMove::Play { tile, end } => {
                let hand = &mut next.hands[side];
                let idx = hand
                    .iter()
                    .position(|t| t.same_as(tile))
                    .expect("played tile must be in the mover's hand");
                hand.remove(idx);

                match (end, next.open_ends()) {
                    (ChainEnd::Left, Some((left, _))) => {
                        let placed = if tile.1 == left { tile } else { tile.flipped() };
                        next.chain.push_front(placed);
                    }
                    (ChainEnd::Right, Some((_, right))) => {
                        let placed = if tile.0 == right { tile } else { tile.flipped() };
                        next.chain.push_back(placed);
                    }
                    _ => next.chain.push_back(tile),
                }
                next.history.push_back(DominoEvent::Play { side, tile, end });
                next.consecutive_passes = 0;
            }
            DominoMove::Pass => {
                next.history.push_back(DominoEvent::Pass {
                    side,
                    open_ends: position.open_ends(),
                });
                next.consecutive_passes += 1;
            }
        }

        next.side_to_move = side.opponent();
        next
    }

    fn status(&self, position: &DominoPosition) -> GameStatus {
        if position.hands.iter().any(|(_, hand)| hand.is_empty()) {
            GameStatus::HandExhausted
        } else if position.consecutive_passes >= 2 {
            GameStatus::NoLegalMove
        } else {
            GameStatus::Ongoing
        }
    }

    fn result(&self, position: &DominoPosition) -> Option<GameResult> {
        if let Some((side, _)) = position.hands.iter().find(|(_, hand)| hand.is_empty()) {
            return Some(GameResult::Winner(side));
        }
        if position.consecutive_passes < 2 {
            return None;
        }
        let (white, black) = (position.pip_total(Side::White), position.pip_total(Side::Black));
        Some(match white.cmp(&black) {
            std::cmp::Ordering::Less => GameResult::Winner(Side::White),
            std::cmp::Ordering::Greater => GameResult::Winner(Side::Black),
            std::cmp::Ordering::Equal => GameResult::Draw,
        })
    }

    /// Tiles match regardless of orientation.
    fn designates(&self, legal: &DominoMove, submitted: &DominoMove) -> bool {
        match (legal, submitted) {
            (DominoMove::Play { tile: a, end: e1 }, DominoMove::Play { tile: b, end: e2 }) => {
                a.same_as(*b) && e1 == e2
            }
            (DominoMove::Pass, DominoMove::Pass) => true,
            _ => false,
        }
    }

    fn forced_pass(&self, position: &DominoPosition) -> Option<DominoMove> {
        let moves = self.legal_moves(position);
        (moves == [DominoMove::Pass]).then_some(DominoMove::Pass)
    }
}

impl OpponentPolicy for DominoRules {
    fn select_move(
        &self,
        position: &DominoPosition,
        config: &EngineConfig,
        rng: &mut GameRng,
    ) -> Option<DominoMove> {
        heuristic::domino::select_move(position, config.difficulty, rng)
    }
}
