//! Dominoes with a double-six set.

mod rules;
mod tile;

pub use rules::{ChainEnd, DominoEvent, DominoMove, DominoPosition, DominoRules};
pub use tile::{Tile, HAND_SIZE, MAX_PIP};
