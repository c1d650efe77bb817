//! A two-player card battle played with a standard deck.

mod card;
mod rules;

pub use card::{Card, Rank, Suit};
pub use rules::{CardBattlePosition, CardBattleRules, CardMove, Round, TableCard, CARD_HAND_SIZE};
