use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tabletop_engine::core::{Difficulty, EngineConfig, GameRng};
use tabletop_engine::games::checkers::{CheckersEvaluator, CheckersPosition, CheckersRules};
use tabletop_engine::games::chess::{ChessEvaluator, ChessPosition, ChessRules};
use tabletop_engine::games::domino::{DominoPosition, DominoRules};
use tabletop_engine::rules::{OpponentPolicy, RulesEngine};
use tabletop_engine::search::{search_root, Pruning};

fn bench_movegen(c: &mut Criterion) {
    let positions = vec![
        ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        ("middlegame", "r1bq1rk1/ppp2ppp/2np1n2/2b1p3/2B1P3/2NP1N2/PPP2PPP/R1BQ1RK1 w - - 0 7"),
        ("endgame", "8/5pk1/6p1/8/3R4/6P1/5PK1/3r4 w - - 0 40"),
    ];

    for (name, fen) in positions {
        let pos = ChessPosition::from_fen(fen).expect("valid FEN");
        c.bench_function(&format!("chess_movegen_{name}"), |b| {
            b.iter(|| ChessRules.legal_moves(black_box(&pos)).len());
        });
    }

    let checkers = CheckersPosition::start();
    c.bench_function("checkers_movegen_startpos", |b| {
        b.iter(|| CheckersRules.legal_moves(black_box(&checkers)).len());
    });
}

fn bench_search(c: &mut Criterion) {
    let chess = ChessPosition::start();
    let moves = ChessRules.legal_moves(&chess);
    let modes = [("alpha_beta", Pruning::AlphaBeta), ("exhaustive", Pruning::Exhaustive)];
    for (name, pruning) in modes {
        c.bench_function(&format!("chess_depth3_{name}"), |b| {
            b.iter(|| {
                let pos = black_box(&chess);
                search_root(&ChessRules, &ChessEvaluator, pos, &moves, 3, pruning).best
            });
        });
    }

    let checkers = CheckersPosition::start();
    let moves = CheckersRules.legal_moves(&checkers);
    c.bench_function("checkers_depth6_alpha_beta", |b| {
        b.iter(|| {
            let pos = black_box(&checkers);
            search_root(&CheckersRules, &CheckersEvaluator, pos, &moves, 6, Pruning::AlphaBeta).best
        });
    });
}

fn bench_heuristics(c: &mut Criterion) {
    let config = EngineConfig::default().with_difficulty(Difficulty::Impossible);
    let mut rng = GameRng::new(42);
    let dealt = DominoPosition::deal(&mut rng);
    let opened = DominoRules.apply_move(&dealt, &DominoRules.legal_moves(&dealt)[0]);

    c.bench_function("domino_impossible_select", |b| {
        b.iter(|| DominoRules.select_move(black_box(&opened), &config, &mut rng));
    });
}

criterion_group!(benches, bench_movegen, bench_search, bench_heuristics);
criterion_main!(benches);
