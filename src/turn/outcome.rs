//! Stateless turn entry points.
//!
//! `submit_move` is the single mutating entry point for a human move and
//! `compute_opponent_move` the one for the synthetic side. Both take the
//! current position by reference and hand back a new one; callers that
//! persist positions themselves can use them without a controller.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, EngineError, EngineResult, GameRng, Side};
use crate::rules::{GameResult, GameStatus, Highlight, OpponentPolicy, RulesEngine};

/// The move just played, for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove<M> {
    pub mover: Side,
    pub mv: M,
    /// Board squares to highlight, for board games.
    pub highlight: Option<Highlight>,
}

/// Result of an accepted move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome<P, M> {
    pub position: P,
    pub status: GameStatus,
    /// Set once `status` is terminal.
    pub result: Option<GameResult>,
    pub last_move: LastMove<M>,
    /// The same side moves again (checkers capture chain).
    pub continues_turn: bool,
}

/// What the synthetic side did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OpponentOutcome<P, M> {
    /// A move was chosen and applied.
    Moved(MoveOutcome<P, M>),
    /// Nothing to play. `pass` holds the forced pass when the game records
    /// one (dominoes); otherwise `status` says why the side is stuck.
    NoMove {
        status: GameStatus,
        pass: Option<MoveOutcome<P, M>>,
    },
}

impl<P, M> OpponentOutcome<P, M> {
    /// The position after the opponent acted, if anything was applied.
    #[must_use]
    pub fn position(&self) -> Option<&P> {
        match self {
            OpponentOutcome::Moved(outcome)
            | OpponentOutcome::NoMove {
                pass: Some(outcome), ..
            } => Some(&outcome.position),
            OpponentOutcome::NoMove { pass: None, .. } => None,
        }
    }

    /// The applied outcome, move or forced pass.
    #[must_use]
    pub fn applied(&self) -> Option<&MoveOutcome<P, M>> {
        match self {
            OpponentOutcome::Moved(outcome) => Some(outcome),
            OpponentOutcome::NoMove { pass, .. } => pass.as_ref(),
        }
    }
}

/// Apply an already validated move and describe the result.
pub(crate) fn apply<R: RulesEngine>(
    rules: &R,
    position: &R::Position,
    mv: R::Move,
) -> MoveOutcome<R::Position, R::Move> {
    let mover = rules.side_to_move(position);
    let next = rules.apply_move(position, &mv);
    let status = rules.status(&next);
    let result = if status.is_terminal() { rules.result(&next) } else { None };
    MoveOutcome {
        continues_turn: rules.continues_turn(&next),
        status,
        result,
        last_move: LastMove {
            mover,
            highlight: rules.highlight(&mv),
            mv,
        },
        position: next,
    }
}

/// Validate and apply a move submitted by `mover`.
///
/// # Errors
///
/// - `GameOver` if the position is terminal
/// - `OutOfTurn` if `mover` is not the side to move
/// - `IllegalMove` if `mv` designates none of the legal moves
///
/// The input position is untouched on error.
pub fn submit_move<R: RulesEngine>(
    rules: &R,
    position: &R::Position,
    mv: &R::Move,
    mover: Side,
) -> EngineResult<MoveOutcome<R::Position, R::Move>> {
    if rules.status(position).is_terminal() {
        warn!("{} move {mv:?} rejected: game over", rules.kind());
        return Err(EngineError::GameOver);
    }

    let expected = rules.side_to_move(position);
    if mover != expected {
        warn!("{} move {mv:?} rejected: {mover} out of turn", rules.kind());
        return Err(EngineError::OutOfTurn { mover, expected });
    }

    let Some(legal) = rules
        .legal_moves(position)
        .into_iter()
        .find(|legal| rules.designates(legal, mv))
    else {
        warn!("{} move {mv:?} rejected: not legal", rules.kind());
        return Err(EngineError::illegal(format!("{mv:?} is not a legal {} move", rules.kind())));
    };

    let outcome = apply(rules, position, legal);
    info!("{} {mover} played {:?} -> {:?}", rules.kind(), outcome.last_move.mv, outcome.status);
    Ok(outcome)
}

/// Let the synthetic side act on `position`.
///
/// Chooses a move through the game's `OpponentPolicy` and applies it. When
/// the policy finds nothing, a forced pass is applied where the game has
/// one; otherwise the result is `NoMove` with the position's status, which
/// for chess and checkers means the side has lost (or, in chess, is
/// stalemated).
pub fn compute_opponent_move<R: OpponentPolicy>(
    rules: &R,
    position: &R::Position,
    config: &EngineConfig,
    rng: &mut GameRng,
) -> OpponentOutcome<R::Position, R::Move> {
    let status = rules.status(position);
    if status.is_terminal() {
        return OpponentOutcome::NoMove { status, pass: None };
    }

    match rules.select_move(position, config, rng) {
        Some(mv) => {
            let outcome = apply(rules, position, mv);
            info!(
                "{} opponent ({}) played {:?} -> {:?}",
                rules.kind(),
                config.difficulty,
                outcome.last_move.mv,
                outcome.status
            );
            OpponentOutcome::Moved(outcome)
        }
        None => {
            let pass = rules.forced_pass(position).map(|mv| apply(rules, position, mv));
            let status = pass.as_ref().map_or(status, |outcome| outcome.status);
            info!("{} opponent has no move ({status:?})", rules.kind());
            OpponentOutcome::NoMove { status, pass }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::chess::{ChessMove, ChessPosition, ChessRules};
    use crate::core::Square;

    const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn test_submit_legal_move() {
        let start = ChessPosition::start();
        let e4 = ChessMove::new(sq("e2"), sq("e4"));
        let outcome = submit_move(&ChessRules, &start, &e4, Side::White).unwrap();
        assert_eq!(outcome.status, GameStatus::Ongoing);
        assert_eq!(outcome.last_move.mover, Side::White);
        assert_eq!(
            outcome.last_move.highlight,
            Some(Highlight {
                from: sq("e2"),
                to: sq("e4")
            })
        );
        assert_eq!(outcome.position.side_to_move(), Side::Black);
        assert!(!outcome.continues_turn);
    }

    #[test]
    fn test_submit_rejections() {
        let start = ChessPosition::start();
        let leap = ChessMove::new(sq("e2"), sq("e5"));
        let err = submit_move(&ChessRules, &start, &leap, Side::White).unwrap_err();
        assert!(matches!(err, EngineError::IllegalMove { .. }));

        let e5 = ChessMove::new(sq("e7"), sq("e5"));
        let err = submit_move(&ChessRules, &start, &e5, Side::Black).unwrap_err();
        assert_eq!(
            err,
            EngineError::OutOfTurn {
                mover: Side::Black,
                expected: Side::White
            }
        );

        let mated = ChessPosition::from_fen(FOOLS_MATE).unwrap();
        let a3 = ChessMove::new(sq("a2"), sq("a3"));
        let err = submit_move(&ChessRules, &mated, &a3, Side::White).unwrap_err();
        assert_eq!(err, EngineError::GameOver);
    }

    #[test]
    fn test_opponent_on_terminal_position() {
        let mated = ChessPosition::from_fen(FOOLS_MATE).unwrap();
        let outcome = compute_opponent_move(
            &ChessRules,
            &mated,
            &EngineConfig::default(),
            &mut GameRng::new(0),
        );
        assert_eq!(
            outcome,
            OpponentOutcome::NoMove {
                status: GameStatus::Checkmate,
                pass: None
            }
        );
        assert!(outcome.position().is_none());
    }
}
