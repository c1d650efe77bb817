//! Minimax with alpha-beta pruning.
//!
//! The driver is generic over any `RulesEngine` paired with an `Evaluator`.
//! Every simulated move goes through `RulesEngine::apply_move`, which returns
//! a fresh position, so sibling branches never observe each other's state.
//!
//! A ply that leaves the same side to move (a checkers capture chain link)
//! is searched at the same depth and with the same maximizing flag: the turn
//! has not changed yet.

use std::time::Instant;

use log::debug;

use crate::core::{Difficulty, EngineConfig, GameRng, Side};
use crate::rules::{GameResult, RulesEngine};

use super::stats::SearchStats;
use super::Evaluator;

/// Score of a won terminal position before the depth bonus.
pub const WIN_SCORE: i32 = 100_000;

/// Bound wider than any reachable score.
pub const SCORE_INFINITY: i32 = 1_000_000;

/// Whether sibling enumeration may stop early.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pruning {
    AlphaBeta,
    Exhaustive,
}

/// Depth-limited minimax search from a fixed perspective.
pub struct Minimax<'a, R: RulesEngine, E: Evaluator<R>> {
    rules: &'a R,
    evaluator: &'a E,
    perspective: Side,
    pruning: Pruning,
    stats: SearchStats,
}

impl<'a, R: RulesEngine, E: Evaluator<R>> Minimax<'a, R, E> {
    /// Search scoring positions for `perspective`, with alpha-beta pruning.
    pub fn new(rules: &'a R, evaluator: &'a E, perspective: Side) -> Self {
        Self {
            rules,
            evaluator,
            perspective,
            pruning: Pruning::AlphaBeta,
            stats: SearchStats::default(),
        }
    }

    /// Set the pruning mode.
    #[must_use]
    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Minimax value of `position`.
    ///
    /// `maximizing` is true when the side to move is the perspective side.
    pub fn search(
        &mut self,
        position: &R::Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.stats.nodes += 1;

        if depth == 0 {
            self.stats.evaluations += 1;
            return self.evaluator.evaluate(position, self.perspective);
        }

        let moves = self.rules.legal_moves(position);
        if moves.is_empty() {
            return self.terminal_score(position, depth);
        }

        let mut best = if maximizing { -SCORE_INFINITY } else { SCORE_INFINITY };

        for mv in &moves {
            let child = self.rules.apply_move(position, mv);
            let value = if self.rules.continues_turn(&child) {
                self.stats.continuations += 1;
                self.search(&child, depth, alpha, beta, maximizing)
            } else {
                self.search(&child, depth - 1, alpha, beta, !maximizing)
            };

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            if self.pruning == Pruning::AlphaBeta && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }

    /// Score of a position where the side to move has no legal move.
    ///
    /// Wins found with more depth remaining (sooner) score higher.
    fn terminal_score(&mut self, position: &R::Position, depth: u8) -> i32 {
        self.stats.terminals += 1;
        match self.rules.result(position) {
            Some(GameResult::Winner(side)) if side == self.perspective => {
                WIN_SCORE + i32::from(depth)
            }
            Some(GameResult::Winner(_)) => -(WIN_SCORE + i32::from(depth)),
            Some(GameResult::Draw) => 0,
            None => self.evaluator.evaluate(position, self.perspective),
        }
    }
}

/// Outcome of a root-level search.
#[derive(Clone, Debug)]
pub struct RootDecision<M> {
    /// The best move, `None` if there were no candidates.
    pub best: Option<M>,

    /// Score of the best move from the mover's perspective.
    pub score: i32,

    /// Score of every candidate, in candidate order.
    pub scores: Vec<i32>,

    pub stats: SearchStats,
}

/// Score each candidate root move with its own full-window search and keep
/// the best one for the side to move. Ties keep the earliest candidate.
///
/// Searching every root move with a full window makes the chosen move
/// independent of `pruning`.
pub fn search_root<R, E>(
    rules: &R,
    evaluator: &E,
    position: &R::Position,
    candidates: &[R::Move],
    depth: u8,
    pruning: Pruning,
) -> RootDecision<R::Move>
where
    R: RulesEngine,
    E: Evaluator<R>,
{
    let start = Instant::now();
    let perspective = rules.side_to_move(position);
    let depth = depth.max(1);
    let mut minimax = Minimax::new(rules, evaluator, perspective).with_pruning(pruning);

    let mut best: Option<(usize, i32)> = None;
    let mut scores = Vec::with_capacity(candidates.len());

    for (i, mv) in candidates.iter().enumerate() {
        let child = rules.apply_move(position, mv);
        let value = if rules.continues_turn(&child) {
            minimax.search(&child, depth, -SCORE_INFINITY, SCORE_INFINITY, true)
        } else {
            minimax.search(&child, depth - 1, -SCORE_INFINITY, SCORE_INFINITY, false)
        };
        scores.push(value);

        if best.map_or(true, |(_, score)| value > score) {
            best = Some((i, value));
        }
    }

    let mut stats = minimax.stats.clone();
    stats.time_us = start.elapsed().as_micros() as u64;

    debug!(
        "{} search depth {} over {} root moves: {} nodes ({:.0} nps), {} cutoffs, best score {:?}",
        rules.kind(),
        depth,
        candidates.len(),
        stats.nodes,
        stats.nodes_per_second(),
        stats.cutoffs,
        best.map(|(_, s)| s)
    );

    RootDecision {
        best: best.map(|(i, _)| candidates[i].clone()),
        score: best.map_or(-SCORE_INFINITY, |(_, s)| s),
        scores,
        stats,
    }
}

/// Pick a move for the side to move with a depth-limited search.
///
/// Root moves are shuffled first so equal-scored moves vary between seeds.
/// On `Easy`, a uniformly random legal move replaces the search with
/// probability `config.easy_random_chance`.
pub fn choose_move<R, E>(
    rules: &R,
    evaluator: &E,
    position: &R::Position,
    depth: u8,
    config: &EngineConfig,
    rng: &mut GameRng,
) -> Option<R::Move>
where
    R: RulesEngine,
    E: Evaluator<R>,
{
    let mut moves = rules.legal_moves(position);
    if moves.is_empty() {
        return None;
    }
    rng.shuffle(&mut moves);

    if config.difficulty == Difficulty::Easy && rng.gen_bool(config.easy_random_chance) {
        debug!("{} easy opponent plays a random move", rules.kind());
        return rng.choose(&moves).cloned();
    }

    search_root(rules, evaluator, position, &moves, depth, Pruning::AlphaBeta).best
}
