//! Adversarial search for the board games.
//!
//! ## Overview
//!
//! - `Evaluator`: static scoring of a position from one side's perspective
//! - `Minimax`: depth-limited minimax with optional alpha-beta pruning
//! - `search_root` / `choose_move`: root-level driver used by the chess and
//!   checkers opponents
//!
//! ## Usage
//!
//! ```rust
//! use tabletop_engine::core::{EngineConfig, GameRng};
//! use tabletop_engine::games::chess::{ChessEvaluator, ChessPosition, ChessRules};
//! use tabletop_engine::search::choose_move;
//!
//! let position = ChessPosition::start();
//! let mut rng = GameRng::new(3);
//! let config = EngineConfig::default();
//! let mv = choose_move(&ChessRules, &ChessEvaluator, &position, 1, &config, &mut rng);
//! assert!(mv.is_some());
//! ```

pub mod minimax;
pub mod stats;

pub use minimax::{
    choose_move, search_root, Minimax, Pruning, RootDecision, SCORE_INFINITY, WIN_SCORE,
};
pub use stats::SearchStats;

use crate::core::Side;
use crate::rules::RulesEngine;

/// Static position scoring. Higher is better for `perspective`.
pub trait Evaluator<R: RulesEngine> {
    fn evaluate(&self, position: &R::Position, perspective: Side) -> i32;
}
