//! Domino integration tests: dealing, plays, passes, blocked games.

use im::Vector;
use proptest::prelude::*;

use tabletop_engine::codec::{decode_json, encode_json};
use tabletop_engine::core::{Difficulty, EngineConfig, GameRng, Side, SideMap};
use tabletop_engine::games::domino::{
    ChainEnd, DominoEvent, DominoMove, DominoPosition, DominoRules, Tile, HAND_SIZE,
};
use tabletop_engine::rules::{GameResult, GameStatus, OpponentPolicy, RulesEngine};

fn tiles(faces: &[(u8, u8)]) -> Vector<Tile> {
    faces.iter().map(|&(a, b)| Tile(a, b)).collect()
}

fn position(
    chain: &[(u8, u8)],
    white: &[(u8, u8)],
    black: &[(u8, u8)],
    to_move: Side,
) -> DominoPosition {
    let hands = SideMap::new(|side| match side {
        Side::White => tiles(white),
        Side::Black => tiles(black),
    });
    DominoPosition::from_parts(tiles(chain), hands, to_move).unwrap()
}

#[test]
fn test_deal() {
    let pos = DominoPosition::deal(&mut GameRng::new(17));
    assert_eq!(pos.hand(Side::White).len(), HAND_SIZE);
    assert_eq!(pos.hand(Side::Black).len(), HAND_SIZE);
    assert_eq!(pos.boneyard().len(), 28 - 2 * HAND_SIZE);
    assert!(pos.chain().is_empty());
    assert_eq!(pos.side_to_move(), Side::White);
    assert_eq!(DominoRules.legal_moves(&pos).len(), HAND_SIZE);
}

#[test]
fn test_opening_leads_highest_double() {
    let pos = position(
        &[],
        &[(6, 6), (5, 5), (6, 5), (0, 1), (2, 3), (4, 4), (1, 2)],
        &[(0, 0), (1, 1), (2, 2), (3, 3), (0, 2), (0, 3), (0, 4)],
        Side::White,
    );
    for difficulty in Difficulty::ALL {
        let config = EngineConfig::default().with_difficulty(difficulty);
        let mv = DominoRules.select_move(&pos, &config, &mut GameRng::new(0)).unwrap();
        assert_eq!(
            mv,
            DominoMove::Play {
                tile: Tile(6, 6),
                end: ChainEnd::Start
            }
        );
    }

    let after = DominoRules.apply_move(
        &pos,
        &DominoMove::Play {
            tile: Tile(6, 6),
            end: ChainEnd::Start,
        },
    );
    assert_eq!(after.chain(), &tiles(&[(6, 6)]));
    assert_eq!(after.open_ends(), Some((6, 6)));
    assert_eq!(after.side_to_move(), Side::Black);
}

#[test]
fn test_tiles_are_oriented_onto_the_chain() {
    let pos = position(&[(3, 5)], &[(1, 3), (5, 0)], &[(2, 2), (4, 4)], Side::White);
    let left = DominoRules.apply_move(
        &pos,
        &DominoMove::Play {
            tile: Tile(1, 3),
            end: ChainEnd::Left,
        },
    );
    assert_eq!(left.chain(), &tiles(&[(1, 3), (3, 5)]));

    let right = DominoRules.apply_move(
        &pos,
        &DominoMove::Play {
            tile: Tile(5, 0),
            end: ChainEnd::Right,
        },
    );
    assert_eq!(right.chain(), &tiles(&[(3, 5), (5, 0)]));
    assert_eq!(right.open_ends(), Some((3, 0)));
}

#[test]
fn test_pass_when_nothing_matches() {
    let pos = position(&[(6, 6)], &[(1, 2), (3, 4)], &[(6, 1), (0, 0)], Side::White);
    assert_eq!(DominoRules.legal_moves(&pos), vec![DominoMove::Pass]);
    assert_eq!(DominoRules.forced_pass(&pos), Some(DominoMove::Pass));
    assert!(DominoRules
        .select_move(&pos, &EngineConfig::default(), &mut GameRng::new(0))
        .is_none());

    let after = DominoRules.apply_move(&pos, &DominoMove::Pass);
    assert_eq!(after.consecutive_passes(), 1);
    assert_eq!(
        after.history().back(),
        Some(&DominoEvent::Pass {
            side: Side::White,
            open_ends: Some((6, 6))
        })
    );
    assert_eq!(DominoRules.status(&after), GameStatus::Ongoing);
}

#[test]
fn test_blocked_game_goes_to_lower_pips() {
    let pos = position(&[(6, 6)], &[(1, 2)], &[(0, 3), (4, 5)], Side::White);
    let pos = DominoRules.apply_move(&pos, &DominoMove::Pass);
    let pos = DominoRules.apply_move(&pos, &DominoMove::Pass);
    assert_eq!(DominoRules.status(&pos), GameStatus::NoLegalMove);
    assert_eq!(DominoRules.result(&pos), Some(GameResult::Winner(Side::White)));
    assert!(DominoRules.legal_moves(&pos).is_empty());
}

#[test]
fn test_empty_hand_wins() {
    let pos = position(&[(2, 6)], &[(6, 4)], &[(0, 0), (1, 1)], Side::White);
    let pos = DominoRules.apply_move(
        &pos,
        &DominoMove::Play {
            tile: Tile(6, 4),
            end: ChainEnd::Right,
        },
    );
    assert_eq!(DominoRules.status(&pos), GameStatus::HandExhausted);
    assert_eq!(DominoRules.result(&pos), Some(GameResult::Winner(Side::White)));
}

#[test]
fn test_rejects_duplicate_tiles() {
    let hands = SideMap::new(|side| match side {
        Side::White => tiles(&[(1, 6)]),
        Side::Black => tiles(&[(6, 1)]),
    });
    assert!(DominoPosition::from_parts(Vector::new(), hands, Side::White).is_err());
}

// =============================================================================
// Properties
// =============================================================================

fn all_tiles(pos: &DominoPosition) -> Vec<Tile> {
    let mut all: Vec<Tile> = pos
        .chain()
        .iter()
        .chain(pos.hand(Side::White).iter())
        .chain(pos.hand(Side::Black).iter())
        .chain(pos.boneyard().iter())
        .map(|t| t.normalized())
        .collect();
    all.sort_by_key(|t| (t.0, t.1));
    all
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]

    /// The 28 tiles are conserved, the chain stays connected, and every
    /// position along a random game survives a JSON round trip.
    #[test]
    fn prop_random_game_conserves_tiles(seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let mut pos = DominoPosition::deal(&mut rng);
        let expected: Vec<Tile> = {
            let mut set: Vec<Tile> = Tile::full_set().collect();
            set.sort_by_key(|t| (t.0, t.1));
            set
        };

        while !DominoRules.status(&pos).is_terminal() {
            let moves = DominoRules.legal_moves(&pos);
            prop_assert!(!moves.is_empty());
            let mv = *rng.choose(&moves).unwrap();
            pos = DominoRules.apply_move(&pos, &mv);

            prop_assert_eq!(all_tiles(&pos), expected.clone());
            for (a, b) in pos.chain().iter().zip(pos.chain().iter().skip(1)) {
                prop_assert_eq!(a.1, b.0);
            }
            let back: DominoPosition = decode_json(&encode_json(&pos).unwrap()).unwrap();
            prop_assert_eq!(back, pos.clone());
        }
        prop_assert!(DominoRules.result(&pos).is_some());
    }
}
