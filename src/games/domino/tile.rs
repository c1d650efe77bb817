//! Double-six domino tiles.

use serde::{Deserialize, Serialize};

use crate::core::EngineError;

/// Highest pip value on a double-six set.
pub const MAX_PIP: u8 = 6;

/// Tiles dealt to each side.
pub const HAND_SIZE: usize = 7;

/// A tile, serialized as `[a, b]`.
///
/// The pair is ordered: in the chain, `.0` faces left and `.1` faces right.
/// Identity ignores orientation, see [`Tile::same_as`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct Tile(pub u8, pub u8);

impl Tile {
    /// Build a tile, `None` if a face exceeds [`MAX_PIP`].
    #[must_use]
    pub fn new(a: u8, b: u8) -> Option<Self> {
        (a <= MAX_PIP && b <= MAX_PIP).then_some(Self(a, b))
    }

    #[must_use]
    pub fn is_double(self) -> bool {
        self.0 == self.1
    }

    #[must_use]
    pub fn pips(self) -> u32 {
        u32::from(self.0) + u32::from(self.1)
    }

    #[must_use]
    pub fn has(self, value: u8) -> bool {
        self.0 == value || self.1 == value
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        Self(self.1, self.0)
    }

    /// Orientation-free form, smaller face first.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            self.flipped()
        }
    }

    /// Whether both values name the same physical tile.
    #[must_use]
    pub fn same_as(self, other: Tile) -> bool {
        self.normalized() == other.normalized()
    }

    /// The face left showing when the other face is matched against `value`.
    #[must_use]
    pub fn other_face(self, value: u8) -> Option<u8> {
        if self.0 == value {
            Some(self.1)
        } else if self.1 == value {
            Some(self.0)
        } else {
            None
        }
    }

    /// All 28 tiles of a double-six set.
    pub fn full_set() -> impl Iterator<Item = Tile> {
        (0..=MAX_PIP).flat_map(|a| (a..=MAX_PIP).map(move |b| Tile(a, b)))
    }
}

impl TryFrom<[u8; 2]> for Tile {
    type Error = EngineError;

    fn try_from([a, b]: [u8; 2]) -> Result<Self, Self::Error> {
        Tile::new(a, b).ok_or_else(|| {
            EngineError::malformed(format!("tile [{a}, {b}] exceeds {MAX_PIP} pips"))
        })
    }
}

impl From<Tile> for [u8; 2] {
    fn from(tile: Tile) -> Self {
        [tile.0, tile.1]
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}|{}]", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_set() {
        let tiles: Vec<Tile> = Tile::full_set().collect();
        assert_eq!(tiles.len(), 28);
        assert_eq!(tiles.iter().filter(|t| t.is_double()).count(), 7);
        assert_eq!(tiles.iter().map(|t| t.pips()).sum::<u32>(), 168);
    }

    #[test]
    fn test_faces() {
        let tile = Tile(2, 5);
        assert!(tile.has(5));
        assert_eq!(tile.other_face(5), Some(2));
        assert_eq!(tile.other_face(3), None);
        assert!(tile.same_as(Tile(5, 2)));
        assert_eq!(Tile(6, 1).normalized(), Tile(1, 6));
    }

    #[test]
    fn test_serde_pairs() {
        assert_eq!(serde_json::to_string(&Tile(3, 4)).unwrap(), "[3,4]");
        assert_eq!(serde_json::from_str::<Tile>("[6,0]").unwrap(), Tile(6, 0));
        assert!(serde_json::from_str::<Tile>("[7,0]").is_err());
    }
}
