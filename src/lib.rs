//! # tabletop-engine
//!
//! Rule engines and synthetic opponents for chess, checkers, dominoes and a
//! card battle.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: Every `RulesEngine` returns new positions and never
//!    mutates its input. Search simulates on private copies.
//!
//! 2. **One Seam Per Concern**: Move generation, evaluation, search and
//!    heuristic selection are separate traits and modules; a game plugs in
//!    by implementing `RulesEngine` and `OpponentPolicy`.
//!
//! 3. **Deterministic Opponents**: All randomness goes through a seeded
//!    `GameRng`, so the same seed and position give the same move.
//!
//! ## Architecture
//!
//! - **Minimax with Alpha-Beta**: Chess and checkers search a fixed depth
//!   per difficulty. Capture chains in checkers count as a single ply.
//!
//! - **Heuristic Selection**: Dominoes and cards score the current legal
//!   moves without lookahead.
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` for hands,
//!   chains and histories. Board positions are `Copy`.
//!
//! ## Modules
//!
//! - `core`: Sides, squares, RNG, configuration, history, errors
//! - `rules`: RulesEngine and OpponentPolicy traits, status and results
//! - `games`: Chess, checkers, dominoes, card battle, and runtime dispatch
//! - `search`: Evaluator trait and minimax driver
//! - `heuristic`: Domino and card selectors
//! - `turn`: Move submission, opponent moves, turn controller
//! - `codec`: JSON and binary position encoding

pub mod core;
pub mod rules;
pub mod games;
pub mod search;
pub mod heuristic;
pub mod turn;
pub mod codec;

// Re-export commonly used types
pub use crate::core::{
    Side, SideMap, Square,
    GameRng, GameRngState,
    Difficulty, DepthTable, EngineConfig,
    MoveRecord,
    EngineError, EngineResult,
};

pub use crate::rules::{GameKind, GameResult, GameStatus, Highlight, OpponentPolicy, RulesEngine};

pub use crate::games::{AnyGame, AnyMove, AnyPosition};

pub use crate::search::{
    choose_move, search_root, Evaluator, Minimax, Pruning, RootDecision, SearchStats,
};

pub use crate::turn::{
    compute_opponent_move, submit_move,
    LastMove, MoveOutcome, OpponentOutcome,
    TurnController, TurnPhase, OpponentTicket, ComputedMove,
};

pub use crate::codec::{decode_json, encode_json, from_bytes, to_bytes};
