//! Opponent configuration: difficulty levels and search depths.
//!
//! A single `EngineConfig` drives every synthetic opponent. Chess and
//! checkers read a fixed depth per difficulty from their `DepthTable`; the
//! tile and card selectors only read the difficulty.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::EngineError;

/// Synthetic opponent strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Impossible,
    ];
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Impossible => "impossible",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "impossible" => Ok(Difficulty::Impossible),
            other => Err(EngineError::InvalidConfig(format!("unknown difficulty '{other}'"))),
        }
    }
}

/// Search depth (in plies) per difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthTable {
    pub easy: u8,
    pub medium: u8,
    pub hard: u8,
    pub impossible: u8,
}

impl DepthTable {
    #[must_use]
    pub const fn new(easy: u8, medium: u8, hard: u8, impossible: u8) -> Self {
        Self {
            easy,
            medium,
            hard,
            impossible,
        }
    }

    /// Depth for a difficulty, never below one ply.
    #[must_use]
    pub fn depth(&self, difficulty: Difficulty) -> u8 {
        let depth = match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Impossible => self.impossible,
        };
        depth.max(1)
    }
}

/// Synthetic opponent configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Strength of the synthetic opponent.
    pub difficulty: Difficulty,

    /// Chess search depths.
    pub chess_depths: DepthTable,

    /// Checkers search depths. Deeper than chess: the branching factor is smaller.
    pub checkers_depths: DepthTable,

    /// Probability that an easy searcher plays a uniformly random legal move
    /// instead of searching.
    pub easy_random_chance: f64,

    /// Seed for dealing and opponent randomness.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            chess_depths: DepthTable::new(1, 2, 3, 4),
            checkers_depths: DepthTable::new(1, 3, 4, 6),
            easy_random_chance: 0.4,
            seed: 42,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_easy_random_chance(mut self, chance: f64) -> Self {
        self.easy_random_chance = chance;
        self
    }

    #[must_use]
    pub fn with_chess_depths(mut self, depths: DepthTable) -> Self {
        self.chess_depths = depths;
        self
    }

    #[must_use]
    pub fn with_checkers_depths(mut self, depths: DepthTable) -> Self {
        self.checkers_depths = depths;
        self
    }

    /// Reject values that cannot drive an opponent.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&self.easy_random_chance) {
            return Err(EngineError::InvalidConfig(format!(
                "easy_random_chance must be within 0..=1, got {}",
                self.easy_random_chance
            )));
        }
        Ok(())
    }
}
