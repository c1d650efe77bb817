//! Turn orchestration.
//!
//! - `submit_move` / `compute_opponent_move`: stateless entry points over a
//!   caller-owned position
//! - `TurnController`: owns a match, tracks whose turn it is, keeps the
//!   history and refuses stale opponent computations

mod controller;
mod outcome;

pub use controller::{ComputedMove, OpponentTicket, TurnController, TurnPhase};
pub use outcome::{compute_opponent_move, submit_move, LastMove, MoveOutcome, OpponentOutcome};
