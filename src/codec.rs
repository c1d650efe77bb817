//! Position encoding for the persistence boundary.
//!
//! JSON is the textual form exchanged with the surrounding application:
//! chess positions as FEN strings, checkers boards as nested 8×8 arrays,
//! domino tiles as `[a, b]` pairs. Binary snapshots go through `bincode`.
//! Decoding validates the position and reports `MalformedPosition`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{EngineError, EngineResult};

/// Encode as JSON.
pub fn encode_json<T: Serialize>(value: &T) -> EngineResult<String> {
    serde_json::to_string(value).map_err(|e| EngineError::malformed(format!("json encode: {e}")))
}

/// Decode from JSON.
pub fn decode_json<T: DeserializeOwned>(text: &str) -> EngineResult<T> {
    serde_json::from_str(text).map_err(|e| EngineError::malformed(format!("json decode: {e}")))
}

/// Encode as a compact binary snapshot.
pub fn to_bytes<T: Serialize>(value: &T) -> EngineResult<Vec<u8>> {
    bincode::serialize(value).map_err(|e| EngineError::malformed(format!("binary encode: {e}")))
}

/// Decode a binary snapshot.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> EngineResult<T> {
    bincode::deserialize(bytes).map_err(|e| EngineError::malformed(format!("binary decode: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;
    use crate::games::chess::ChessPosition;
    use crate::games::AnyPosition;
    use crate::rules::GameKind;

    #[test]
    fn test_json_round_trip_all_games() {
        let mut rng = GameRng::new(17);
        for kind in [GameKind::Chess, GameKind::Checkers, GameKind::Domino, GameKind::CardBattle] {
            let pos = AnyPosition::new_game(kind, &mut rng);
            let text = encode_json(&pos).unwrap();
            let back: AnyPosition = decode_json(&text).unwrap();
            assert_eq!(back, pos);
        }
    }

    #[test]
    fn test_binary_round_trip_all_games() {
        let mut rng = GameRng::new(18);
        for kind in [GameKind::Chess, GameKind::Checkers, GameKind::Domino, GameKind::CardBattle] {
            let pos = AnyPosition::new_game(kind, &mut rng);
            let bytes = to_bytes(&pos).unwrap();
            let back: AnyPosition = from_bytes(&bytes).unwrap();
            assert_eq!(back, pos);
        }
    }

    #[test]
    fn test_malformed_input() {
        let err = decode_json::<ChessPosition>("\"8/8/8/8/8/8/8/8 w - - 0 1\"").unwrap_err();
        assert!(matches!(err, EngineError::MalformedPosition(_)));
        assert!(decode_json::<AnyPosition>("{\"go\":null}").is_err());
        assert!(from_bytes::<AnyPosition>(&[1, 2, 3]).is_err());
    }
}
