//! Card battle selection.
//!
//! Answering a table card: play a winning card if one exists (easy wastes
//! its strongest, medium and up spend the weakest that still wins),
//! otherwise throw away the weakest card. Leading: easy plays at random,
//! medium probes with a middle card, hard and impossible lead their
//! strongest.

use crate::core::{Difficulty, GameRng};
use crate::games::cards::{Card, CardBattlePosition, CardMove};

/// Pick a card for the side to move, `None` once its hand is empty.
pub fn select_move(
    position: &CardBattlePosition,
    difficulty: Difficulty,
    rng: &mut GameRng,
) -> Option<CardMove> {
    let mut sorted: Vec<Card> = position.hand(position.side_to_move()).iter().copied().collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by_key(|c| c.rank);

    let card = match position.table() {
        Some(lead) => {
            let winners: Vec<Card> =
                sorted.iter().copied().filter(|c| c.rank > lead.card.rank).collect();
            match (winners.first(), winners.last()) {
                (Some(_), Some(strongest)) if difficulty == Difficulty::Easy => *strongest,
                (Some(weakest), _) => *weakest,
                _ => sorted[0],
            }
        }
        None => match difficulty {
            Difficulty::Easy => *rng.choose(&sorted)?,
            Difficulty::Medium => sorted[sorted.len() / 2],
            Difficulty::Hard | Difficulty::Impossible => sorted[sorted.len() - 1],
        },
    };
    Some(CardMove::new(card))
}
