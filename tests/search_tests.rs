//! Search integration tests on real games.

use tabletop_engine::core::{Difficulty, EngineConfig, GameRng, Side};
use tabletop_engine::games::checkers::{CheckersEvaluator, CheckersPosition, CheckersRules};
use tabletop_engine::games::chess::{ChessEvaluator, ChessMove, ChessPosition, ChessRules};
use tabletop_engine::rules::RulesEngine;
use tabletop_engine::search::{choose_move, search_root, Evaluator, Pruning, WIN_SCORE};

// =============================================================================
// Pruning Equivalence
// =============================================================================

#[test]
fn test_chess_alpha_beta_agrees_with_exhaustive() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let pos = ChessPosition::from_fen(fen).unwrap();
    let moves = ChessRules.legal_moves(&pos);

    let pruned = search_root(&ChessRules, &ChessEvaluator, &pos, &moves, 3, Pruning::AlphaBeta);
    let full = search_root(&ChessRules, &ChessEvaluator, &pos, &moves, 3, Pruning::Exhaustive);

    assert_eq!(pruned.best, full.best);
    assert_eq!(pruned.score, full.score);
    assert_eq!(pruned.scores, full.scores);
    assert!(pruned.stats.nodes <= full.stats.nodes);
    assert!(pruned.stats.cutoffs > 0);
    assert_eq!(full.stats.cutoffs, 0);
}

#[test]
fn test_checkers_alpha_beta_agrees_with_exhaustive() {
    let mut pos = CheckersPosition::start();
    let mut rng = GameRng::new(8);
    for _ in 0..6 {
        let moves = CheckersRules.legal_moves(&pos);
        pos = CheckersRules.apply_move(&pos, rng.choose(&moves).unwrap());
    }
    let moves = CheckersRules.legal_moves(&pos);

    for depth in 2..=4 {
        let search = |pruning| {
            search_root(&CheckersRules, &CheckersEvaluator, &pos, &moves, depth, pruning)
        };
        let pruned = search(Pruning::AlphaBeta);
        let full = search(Pruning::Exhaustive);
        assert_eq!(pruned.best, full.best, "depth {depth}");
        assert_eq!(pruned.scores, full.scores, "depth {depth}");
    }
}

// =============================================================================
// Scores
// =============================================================================

#[test]
fn test_mate_scores_beyond_material() {
    let pos = ChessPosition::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let mate = ChessMove::parse("a1a8").unwrap();
    let decision = search_root(&ChessRules, &ChessEvaluator, &pos, &[mate], 2, Pruning::AlphaBeta);
    assert!(decision.score > WIN_SCORE);
}

#[test]
fn test_evaluators_are_zero_sum() {
    let chess = ChessPosition::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
    assert_eq!(
        ChessEvaluator.evaluate(&chess, Side::White),
        -ChessEvaluator.evaluate(&chess, Side::Black)
    );
    assert!(ChessEvaluator.evaluate(&chess, Side::Black) > 0);

    let checkers = CheckersPosition::start();
    assert_eq!(CheckersEvaluator.evaluate(&checkers, Side::White), 0);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_same_seed_same_move() {
    let pos = ChessPosition::start();
    for difficulty in Difficulty::ALL {
        let config = EngineConfig::default().with_difficulty(difficulty);
        let a = choose_move(&ChessRules, &ChessEvaluator, &pos, 2, &config, &mut GameRng::new(5));
        let b = choose_move(&ChessRules, &ChessEvaluator, &pos, 2, &config, &mut GameRng::new(5));
        assert_eq!(a, b);
        assert!(a.is_some());
    }
}

#[test]
fn test_easy_always_random_plays_legal_moves() {
    let pos = CheckersPosition::start();
    let legal = CheckersRules.legal_moves(&pos);
    let config = EngineConfig::default()
        .with_difficulty(Difficulty::Easy)
        .with_easy_random_chance(1.0);
    for seed in 0..16 {
        let mut rng = GameRng::new(seed);
        let mv = choose_move(&CheckersRules, &CheckersEvaluator, &pos, 3, &config, &mut rng);
        let mv = mv.unwrap();
        assert!(legal.contains(&mv));
    }
}
