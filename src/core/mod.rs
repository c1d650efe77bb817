//! Core engine types: sides, squares, RNG, configuration, history, errors.
//!
//! This module contains the building blocks shared by every game. Games
//! never redefine these; they only add their own positions and moves.

pub mod side;
pub mod square;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use side::{Side, SideMap};
pub use square::{Square, BOARD_SIZE};
pub use rng::{GameRng, GameRngState};
pub use config::{DepthTable, Difficulty, EngineConfig};
pub use action::MoveRecord;
pub use error::{EngineError, EngineResult};
