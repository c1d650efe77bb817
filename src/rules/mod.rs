//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal moves for each position
//! - How moves produce new positions
//! - Check, terminal and win/loss conditions
//!
//! The search driver, the heuristic selectors and the turn controller call
//! into `RulesEngine` but never interpret game-specific concepts directly.

pub mod engine;

pub use engine::{GameKind, GameResult, GameStatus, Highlight, OpponentPolicy, RulesEngine};
