//! Domino tile selection.
//!
//! - Opening (empty chain): highest double, else heaviest tile
//! - Easy: any playable tile
//! - Medium: heaviest playable tile
//! - Hard: leave showing the value the hand holds most of
//! - Impossible: first expose values the opponent has passed on, then as hard

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::{Difficulty, GameRng};
use crate::games::domino::{ChainEnd, DominoMove, DominoPosition, DominoRules, Tile};
use crate::rules::RulesEngine;

/// Pick a play for the side to move, `None` if it must pass.
pub fn select_move(
    position: &DominoPosition,
    difficulty: Difficulty,
    rng: &mut GameRng,
) -> Option<DominoMove> {
    let plays: Vec<DominoMove> = DominoRules
        .legal_moves(position)
        .into_iter()
        .filter(|mv| *mv != DominoMove::Pass)
        .collect();
    if plays.is_empty() {
        return None;
    }

    if position.chain().is_empty() {
        return opening(position);
    }

    match difficulty {
        Difficulty::Easy => rng.choose(&plays).copied(),
        Difficulty::Medium => best_by(&plays, pips),
        Difficulty::Hard => {
            let counts = hand_counts(position);
            best_by(&plays, |mv| (flexibility(position, &counts, mv), pips(mv)))
        }
        Difficulty::Impossible => {
            let counts = hand_counts(position);
            let missing: FxHashSet<u8> =
                position.passed_values(position.side_to_move().opponent()).collect();
            debug!("opponent passed on {missing:?}");
            best_by(&plays, |mv| {
                let blocks = position.exposed_after(mv).is_some_and(|v| missing.contains(&v));
                (blocks, flexibility(position, &counts, mv), pips(mv))
            })
        }
    }
}

/// Highest double, or the heaviest tile when the hand holds none.
fn opening(position: &DominoPosition) -> Option<DominoMove> {
    let hand = position.hand(position.side_to_move());
    let tile = hand
        .iter()
        .filter(|t| t.is_double())
        .max_by_key(|t| t.0)
        .or_else(|| hand.iter().max_by_key(|t| t.pips()))?;
    Some(DominoMove::Play {
        tile: *tile,
        end: ChainEnd::Start,
    })
}

/// First move with the greatest key.
fn best_by<K: Ord>(plays: &[DominoMove], key: impl Fn(&DominoMove) -> K) -> Option<DominoMove> {
    let mut best: Option<(&DominoMove, K)> = None;
    for mv in plays {
        let k = key(mv);
        if best.as_ref().map_or(true, |(_, b)| k > *b) {
            best = Some((mv, k));
        }
    }
    best.map(|(mv, _)| *mv)
}

fn pips(mv: &DominoMove) -> u32 {
    mv.tile().map_or(0, Tile::pips)
}

/// Occurrences of each pip value across the mover's hand.
fn hand_counts(position: &DominoPosition) -> FxHashMap<u8, u32> {
    let mut counts = FxHashMap::default();
    for tile in position.hand(position.side_to_move()) {
        *counts.entry(tile.0).or_insert(0) += 1;
        if !tile.is_double() {
            *counts.entry(tile.1).or_insert(0) += 1;
        }
    }
    counts
}

/// How many faces of the remaining hand match the value this play leaves
/// showing.
fn flexibility(position: &DominoPosition, counts: &FxHashMap<u8, u32>, mv: &DominoMove) -> u32 {
    let (Some(exposed), Some(tile)) = (position.exposed_after(mv), mv.tile()) else {
        return 0;
    };
    let held = counts.get(&exposed).copied().unwrap_or(0);
    // The played tile itself leaves the hand.
    held.saturating_sub(u32::from(tile.has(exposed)))
}
