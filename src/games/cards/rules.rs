//! Card battle: one card per side per round, higher rank takes the round.
//!
//! The leader plays face up, the other side answers. A rank tie awards
//! nothing and the same side leads again; otherwise the round winner leads.
//! The match ends once both hands are spent and is won on rounds.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, EngineError, EngineResult, GameRng, Side, SideMap};
use crate::heuristic;
use crate::rules::{GameKind, GameResult, GameStatus, OpponentPolicy, RulesEngine};

use super::card::Card;

/// Cards dealt to each side.
pub const CARD_HAND_SIZE: usize = 5;

/// Play a card from hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardMove {
    pub card: Card,
}

impl CardMove {
    #[must_use]
    pub const fn new(card: Card) -> Self {
        Self { card }
    }
}

/// A card lying face up on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableCard {
    pub side: Side,
    pub card: Card,
}

/// A completed round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Round {
    pub lead: TableCard,
    pub reply: TableCard,
    /// `None` on a rank tie.
    pub winner: Option<Side>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CardBattleData")]
pub struct CardBattlePosition {
    hands: SideMap<Vector<Card>>,
    table: Option<TableCard>,
    rounds_won: SideMap<u32>,
    side_to_move: Side,
    rounds: Vector<Round>,
}

impl CardBattlePosition {
    /// Shuffle a 52-card deck and deal five cards each. White leads.
    #[must_use]
    pub fn deal(rng: &mut GameRng) -> Self {
        let mut deck: Vec<Card> = Card::deck().collect();
        rng.shuffle(&mut deck);
        let hands = SideMap::new(|side| {
            let start = side.index() * CARD_HAND_SIZE;
            deck[start..start + CARD_HAND_SIZE].iter().copied().collect()
        });
        Self {
            hands,
            table: None,
            rounds_won: SideMap::with_value(0),
            side_to_move: Side::White,
            rounds: Vector::new(),
        }
    }

    /// Position with explicit hands and table card.
    pub fn from_parts(
        hands: SideMap<Vector<Card>>,
        table: Option<TableCard>,
        rounds_won: SideMap<u32>,
        side_to_move: Side,
    ) -> EngineResult<Self> {
        Self::try_from(CardBattleData {
            hands,
            table,
            rounds_won,
            side_to_move,
            rounds: Vector::new(),
        })
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &Vector<Card> {
        &self.hands[side]
    }

    /// The card waiting for an answer, if a round is half played.
    #[must_use]
    pub fn table(&self) -> Option<TableCard> {
        self.table
    }

    #[must_use]
    pub fn rounds_won(&self, side: Side) -> u32 {
        self.rounds_won[side]
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Completed rounds, oldest first.
    #[must_use]
    pub fn rounds(&self) -> &Vector<Round> {
        &self.rounds
    }

    fn is_over(&self) -> bool {
        self.table.is_none() && self.hands.iter().all(|(_, hand)| hand.is_empty())
    }
}

#[derive(Clone, Debug, Deserialize)]
struct CardBattleData {
    hands: SideMap<Vector<Card>>,
    table: Option<TableCard>,
    rounds_won: SideMap<u32>,
    side_to_move: Side,
    #[serde(default)]
    rounds: Vector<Round>,
}

impl TryFrom<CardBattleData> for CardBattlePosition {
    type Error = EngineError;

    fn try_from(data: CardBattleData) -> Result<Self, Self::Error> {
        let mut seen = rustc_hash::FxHashSet::default();
        let in_play = data
            .hands
            .iter()
            .flat_map(|(_, hand)| hand.iter().copied())
            .chain(data.table.map(|t| t.card));
        for card in in_play {
            if !seen.insert(card) {
                return Err(EngineError::malformed(format!("card {card} appears twice")));
            }
        }

        let mover = data.hands[data.side_to_move].len();
        let other = data.hands[data.side_to_move.opponent()].len();
        match data.table {
            Some(t) if t.side == data.side_to_move => {
                return Err(EngineError::malformed(
                    "the side to move already has a card on the table",
                ));
            }
            Some(_) if mover != other + 1 => {
                return Err(EngineError::malformed(format!(
                    "hand sizes {mover} and {other} mid-round"
                )));
            }
            None if mover != other => {
                return Err(EngineError::malformed(format!(
                    "hand sizes {mover} and {other} between rounds"
                )));
            }
            _ => {}
        }

        Ok(Self {
            hands: data.hands,
            table: data.table,
            rounds_won: data.rounds_won,
            side_to_move: data.side_to_move,
            rounds: data.rounds,
        })
    }
}

/// Rules of the card battle.
#[derive(Clone, Copy, Debug, Default)]
pub struct CardBattleRules;

impl RulesEngine for CardBattleRules {
    type Position = CardBattlePosition;
    type Move = CardMove;

    fn kind(&self) -> GameKind {
        GameKind::CardBattle
    }

    fn side_to_move(&self, position: &CardBattlePosition) -> Side {
        position.side_to_move
    }

    fn legal_moves(&self, position: &CardBattlePosition) -> Vec<CardMove> {
        position.hands[position.side_to_move]
            .iter()
            .map(|&card| CardMove::new(card))
            .collect()
    }

    fn apply_move(&self, position: &CardBattlePosition, mv: &CardMove) -> CardBattlePosition {
        let mut next = position.clone();
        let side = position.side_to_move;
        let hand = &mut next.hands[side];
        let idx = hand
            .iter()
            .position(|c| *c == mv.card)
            .expect("played card must be in the mover's hand");
        hand.remove(idx);

        let played = TableCard { side, card: mv.card };
        match position.table {
            None => {
                next.table = Some(played);
                next.side_to_move = side.opponent();
            }
            Some(lead) => {
                let winner = match played.card.rank.cmp(&lead.card.rank) {
                    std::cmp::Ordering::Greater => Some(side),
                    std::cmp::Ordering::Less => Some(lead.side),
                    std::cmp::Ordering::Equal => None,
                };
                if let Some(w) = winner {
                    next.rounds_won[w] += 1;
                }
                next.rounds.push_back(Round {
                    lead,
                    reply: played,
                    winner,
                });
                next.table = None;
                next.side_to_move = winner.unwrap_or(lead.side);
            }
        }
        next
    }

    fn status(&self, position: &CardBattlePosition) -> GameStatus {
        if position.is_over() {
            GameStatus::HandExhausted
        } else {
            GameStatus::Ongoing
        }
    }

    fn result(&self, position: &CardBattlePosition) -> Option<GameResult> {
        if !position.is_over() {
            return None;
        }
        let (white, black) = (position.rounds_won[Side::White], position.rounds_won[Side::Black]);
        Some(match white.cmp(&black) {
            std::cmp::Ordering::Greater => GameResult::Winner(Side::White),
            std::cmp::Ordering::Less => GameResult::Winner(Side::Black),
            std::cmp::Ordering::Equal => GameResult::Draw,
        })
    }
}

impl OpponentPolicy for CardBattleRules {
    fn select_move(
        &self,
        position: &CardBattlePosition,
        config: &EngineConfig,
        rng: &mut GameRng,
    ) -> Option<CardMove> {
        heuristic::cards::select_move(position, config.difficulty, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::cards::{Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Spades)
    }

    fn position(
        white: &[Card],
        black: &[Card],
        table: Option<TableCard>,
        to_move: Side,
    ) -> CardBattlePosition {
        let hands = SideMap::new(|side| match side {
            Side::White => white.iter().copied().collect(),
            Side::Black => black.iter().copied().collect(),
        });
        CardBattlePosition::from_parts(hands, table, SideMap::with_value(0), to_move).unwrap()
    }

    #[test]
    fn test_deal() {
        let pos = CardBattlePosition::deal(&mut GameRng::new(9));
        assert_eq!(pos.hand(Side::White).len(), 5);
        assert_eq!(pos.hand(Side::Black).len(), 5);
        assert!(pos.hand(Side::White).iter().all(|c| !pos.hand(Side::Black).contains(c)));
        assert_eq!(CardBattleRules.legal_moves(&pos).len(), 5);
    }

    #[test]
    fn test_round_winner_leads() {
        let pos = position(&[card(Rank::Five)], &[card(Rank::Nine)], None, Side::White);
        let pos = CardBattleRules.apply_move(&pos, &CardMove::new(card(Rank::Five)));
        assert_eq!(pos.side_to_move(), Side::Black);
        assert_eq!(pos.table().map(|t| t.card), Some(card(Rank::Five)));

        let pos = CardBattleRules.apply_move(&pos, &CardMove::new(card(Rank::Nine)));
        assert_eq!(pos.rounds_won(Side::Black), 1);
        assert_eq!(pos.side_to_move(), Side::Black);
        assert_eq!(pos.table(), None);
        assert_eq!(pos.rounds().len(), 1);
        assert_eq!(CardBattleRules.status(&pos), GameStatus::HandExhausted);
        assert_eq!(CardBattleRules.result(&pos), Some(GameResult::Winner(Side::Black)));
        assert!(CardBattleRules.legal_moves(&pos).is_empty());
    }

    #[test]
    fn test_tie_awards_nothing() {
        let white = [Card::new(Rank::King, Suit::Hearts), card(Rank::Two)];
        let black = [Card::new(Rank::King, Suit::Clubs), card(Rank::Three)];
        let pos = position(&white, &black, None, Side::White);
        let pos = CardBattleRules.apply_move(&pos, &CardMove::new(white[0]));
        let pos = CardBattleRules.apply_move(&pos, &CardMove::new(black[0]));
        assert_eq!(pos.rounds_won(Side::White), 0);
        assert_eq!(pos.rounds_won(Side::Black), 0);
        assert_eq!(pos.side_to_move(), Side::White);
        assert_eq!(pos.rounds()[0].winner, None);
        assert_eq!(CardBattleRules.status(&pos), GameStatus::Ongoing);
    }

    #[test]
    fn test_rejects_inconsistent_positions() {
        let hands = SideMap::with_value(Vector::unit(card(Rank::Ace)));
        let scores = SideMap::with_value(0);
        assert!(CardBattlePosition::from_parts(hands, None, scores, Side::White).is_err());

        let hands = SideMap::new(|side| match side {
            Side::White => Vector::unit(card(Rank::Ace)),
            Side::Black => Vector::new(),
        });
        let table = Some(TableCard {
            side: Side::White,
            card: card(Rank::Two),
        });
        let scores = SideMap::with_value(0);
        assert!(CardBattlePosition::from_parts(hands, table, scores, Side::White).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let pos = CardBattlePosition::deal(&mut GameRng::new(4));
        let pos = CardBattleRules.apply_move(&pos, &CardBattleRules.legal_moves(&pos)[2]);
        let json = serde_json::to_string(&pos).unwrap();
        let back: CardBattlePosition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos);
    }
}
