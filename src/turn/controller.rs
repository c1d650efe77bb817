//! Stateful turn controller with cancellable opponent computations.
//!
//! The controller owns the current position. Opponent moves run in three
//! steps so the search can happen off the controller (another thread, after
//! a presentation delay):
//!
//! 1. `request_opponent_move` hands out an `OpponentTicket` stamped with the
//!    current generation, a copy of the position and a forked RNG
//! 2. `OpponentTicket::compute` runs the policy on that copy
//! 3. `commit` applies the result only if the generation still matches
//!
//! Every change of position (a human move, `sync_position`, `reset`,
//! `cancel`) bumps the generation, so a computation started before it is
//! refused with `StaleComputation` and the position is left untouched.

use im::Vector;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, EngineError, EngineResult, GameRng, GameRngState, MoveRecord, Side};
use crate::rules::{GameResult, GameStatus, OpponentPolicy};

use super::outcome::{compute_opponent_move, submit_move, LastMove, MoveOutcome, OpponentOutcome};

/// Controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    /// Waiting for a human move.
    AwaitingMove,
    /// The synthetic side is to move.
    ComputingOpponentMove,
    /// The match is over.
    Terminal,
}

/// A snapshot an opponent computation runs against.
#[derive(Clone, Debug)]
pub struct OpponentTicket<R: OpponentPolicy> {
    generation: u64,
    position: R::Position,
    config: EngineConfig,
    rng: GameRng,
}

impl<R: OpponentPolicy> OpponentTicket<R> {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn position(&self) -> &R::Position {
        &self.position
    }

    /// Run the opponent policy on the ticket's position.
    #[must_use]
    pub fn compute(mut self, rules: &R) -> ComputedMove<R> {
        let outcome = compute_opponent_move(rules, &self.position, &self.config, &mut self.rng);
        ComputedMove {
            generation: self.generation,
            outcome,
        }
    }
}

/// A finished opponent computation waiting to be committed.
#[derive(Clone, Debug)]
pub struct ComputedMove<R: OpponentPolicy> {
    generation: u64,
    outcome: OpponentOutcome<R::Position, R::Move>,
}

impl<R: OpponentPolicy> ComputedMove<R> {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn outcome(&self) -> &OpponentOutcome<R::Position, R::Move> {
        &self.outcome
    }
}

/// Drives one match: validates human moves, runs the synthetic side and
/// keeps the move history.
pub struct TurnController<R: OpponentPolicy> {
    rules: R,
    position: R::Position,
    config: EngineConfig,
    /// Side played by the engine, `None` for two humans.
    synthetic: Option<Side>,
    phase: TurnPhase,
    generation: u64,
    rng: GameRng,
    history: Vector<MoveRecord<R::Move>>,
    last_move: Option<LastMove<R::Move>>,
}

impl<R: OpponentPolicy> TurnController<R> {
    /// Start a controller on `position`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `config` does not validate.
    pub fn new(
        rules: R,
        position: R::Position,
        config: EngineConfig,
        synthetic: Option<Side>,
    ) -> EngineResult<Self> {
        config.validate()?;
        let rng = GameRng::new(config.seed);
        let mut controller = Self {
            rules,
            position,
            config,
            synthetic,
            phase: TurnPhase::AwaitingMove,
            generation: 0,
            rng,
            history: Vector::new(),
            last_move: None,
        };
        controller.update_phase();
        Ok(controller)
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn position(&self) -> &R::Position {
        &self.position
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn synthetic_side(&self) -> Option<Side> {
        self.synthetic
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.rules.status(&self.position)
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.result(&self.position)
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.rules.side_to_move(&self.position)
    }

    /// Accepted moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord<R::Move>> {
        &self.history
    }

    #[must_use]
    pub fn last_move(&self) -> Option<&LastMove<R::Move>> {
        self.last_move.as_ref()
    }

    /// Opponent RNG state, for storing next to the position.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Continue the opponent RNG from a stored state, so a resumed match
    /// draws the same opponent moves as an uninterrupted one.
    pub fn restore_rng(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
    }

    /// Legal moves for `side`, empty when it is not that side's turn.
    #[must_use]
    pub fn legal_moves_for(&self, side: Side) -> Vec<R::Move> {
        self.rules.legal_moves_for(&self.position, side)
    }

    /// Submit a human move.
    ///
    /// # Errors
    ///
    /// - `GameOver` once the match has ended
    /// - `OutOfTurn` if `mover` is not to move, or is the synthetic side
    /// - `IllegalMove` if the move is not legal
    pub fn submit(
        &mut self,
        mv: &R::Move,
        mover: Side,
    ) -> EngineResult<MoveOutcome<R::Position, R::Move>> {
        if self.phase == TurnPhase::Terminal {
            return Err(EngineError::GameOver);
        }
        if self.synthetic == Some(mover) {
            warn!("{} move rejected: {mover} is played by the engine", self.rules.kind());
            return Err(EngineError::OutOfTurn {
                mover,
                expected: mover.opponent(),
            });
        }

        let outcome = submit_move(&self.rules, &self.position, mv, mover)?;
        self.record(&outcome, false);
        Ok(outcome)
    }

    /// Hand out a ticket for the synthetic side's move.
    ///
    /// # Errors
    ///
    /// - `GameOver` once the match has ended
    /// - `OutOfTurn` if the synthetic side is not to move
    pub fn request_opponent_move(&mut self) -> EngineResult<OpponentTicket<R>> {
        let expected = self.side_to_move();
        match (self.phase, self.synthetic) {
            (TurnPhase::Terminal, _) => Err(EngineError::GameOver),
            (TurnPhase::ComputingOpponentMove, _) => Ok(OpponentTicket {
                generation: self.generation,
                position: self.position.clone(),
                config: self.config.clone(),
                rng: self.rng.fork(),
            }),
            (TurnPhase::AwaitingMove, synthetic) => Err(EngineError::OutOfTurn {
                mover: synthetic.unwrap_or(expected.opponent()),
                expected,
            }),
        }
    }

    /// Apply a computed opponent move.
    ///
    /// # Errors
    ///
    /// `StaleComputation` if the position changed since the ticket was
    /// issued. The result is discarded and nothing changes.
    pub fn commit(
        &mut self,
        computed: ComputedMove<R>,
    ) -> EngineResult<OpponentOutcome<R::Position, R::Move>> {
        if computed.generation != self.generation {
            warn!(
                "{} discarding stale opponent move (generation {} != {})",
                self.rules.kind(),
                computed.generation,
                self.generation
            );
            return Err(EngineError::StaleComputation {
                ticket: computed.generation,
                current: self.generation,
            });
        }

        match computed.outcome.applied() {
            Some(applied) => self.record(applied, true),
            None => {
                // Stuck without a pass to record: the position is final.
                self.generation += 1;
                self.phase = TurnPhase::Terminal;
                info!("{} opponent has no move, match over", self.rules.kind());
            }
        }
        Ok(computed.outcome)
    }

    /// Request, compute and commit one opponent move.
    ///
    /// # Errors
    ///
    /// As `request_opponent_move`.
    pub fn play_opponent_move(&mut self) -> EngineResult<OpponentOutcome<R::Position, R::Move>> {
        let ticket = self.request_opponent_move()?;
        let computed = ticket.compute(&self.rules);
        self.commit(computed)
    }

    /// Play the synthetic side until the turn passes back or the match
    /// ends. A checkers capture chain takes several moves.
    ///
    /// # Errors
    ///
    /// As `request_opponent_move`, for the first move only.
    pub fn play_opponent_turn(
        &mut self,
    ) -> EngineResult<Vec<OpponentOutcome<R::Position, R::Move>>> {
        let mut outcomes = vec![self.play_opponent_move()?];
        while self.phase == TurnPhase::ComputingOpponentMove {
            outcomes.push(self.play_opponent_move()?);
        }
        Ok(outcomes)
    }

    /// Replace the position with one received from outside (another
    /// participant, storage). Any computation in flight becomes stale.
    pub fn sync_position(&mut self, position: R::Position) {
        self.position = position;
        self.generation += 1;
        self.update_phase();
    }

    /// Start over from `position`, clearing the history.
    pub fn reset(&mut self, position: R::Position) {
        self.history = Vector::new();
        self.last_move = None;
        self.sync_position(position);
        info!("{} match reset", self.rules.kind());
    }

    /// Invalidate any computation in flight.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    fn record(&mut self, outcome: &MoveOutcome<R::Position, R::Move>, synthetic: bool) {
        let sequence = self.history.len() as u32;
        self.history.push_back(MoveRecord::new(
            outcome.last_move.mover,
            outcome.last_move.mv.clone(),
            sequence,
            synthetic,
        ));
        self.last_move = Some(outcome.last_move.clone());
        self.position = outcome.position.clone();
        self.generation += 1;
        self.update_phase();
    }

    fn update_phase(&mut self) {
        let status = self.rules.status(&self.position);
        self.phase = if status.is_terminal() {
            info!("{} match over: {:?}", self.rules.kind(), self.rules.result(&self.position));
            TurnPhase::Terminal
        } else if self.synthetic == Some(self.rules.side_to_move(&self.position)) {
            TurnPhase::ComputingOpponentMove
        } else {
            TurnPhase::AwaitingMove
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Square;
    use crate::games::chess::{ChessMove, ChessPosition, ChessRules};

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn controller() -> TurnController<ChessRules> {
        TurnController::new(
            ChessRules,
            ChessPosition::start(),
            EngineConfig::default(),
            Some(Side::Black),
        )
        .unwrap()
    }

    #[test]
    fn test_phases_follow_turns() {
        let mut ctl = controller();
        assert_eq!(ctl.phase(), TurnPhase::AwaitingMove);
        ctl.submit(&ChessMove::new(sq("e2"), sq("e4")), Side::White).unwrap();
        assert_eq!(ctl.phase(), TurnPhase::ComputingOpponentMove);
        ctl.play_opponent_move().unwrap();
        assert_eq!(ctl.phase(), TurnPhase::AwaitingMove);
        assert_eq!(ctl.history().len(), 2);
        assert!(ctl.history()[1].synthetic);
        assert_eq!(ctl.last_move().map(|m| m.mover), Some(Side::Black));
    }

    #[test]
    fn test_stale_ticket_is_refused() {
        let mut ctl = controller();
        ctl.submit(&ChessMove::new(sq("d2"), sq("d4")), Side::White).unwrap();
        let ticket = ctl.request_opponent_move().unwrap();
        let before = *ctl.position();

        ctl.cancel();
        let computed = ticket.compute(&ChessRules);
        let err = ctl.commit(computed).unwrap_err();
        assert!(matches!(err, EngineError::StaleComputation { .. }));
        assert_eq!(*ctl.position(), before);
        assert_eq!(ctl.history().len(), 1);
    }

    #[test]
    fn test_engine_side_cannot_be_submitted() {
        let mut ctl = controller();
        ctl.submit(&ChessMove::new(sq("e2"), sq("e4")), Side::White).unwrap();
        let err = ctl.submit(&ChessMove::new(sq("e7"), sq("e5")), Side::Black).unwrap_err();
        assert!(matches!(err, EngineError::OutOfTurn { .. }));
    }

    #[test]
    fn test_restored_rng_replays_opponent() {
        let mut ctl = controller();
        ctl.submit(&ChessMove::new(sq("e2"), sq("e4")), Side::White).unwrap();
        let saved = ctl.rng_state();
        let position = *ctl.position();

        let first = ctl.play_opponent_move().unwrap();

        let mut resumed = controller();
        resumed.sync_position(position);
        resumed.restore_rng(&saved);
        let second = resumed.play_opponent_move().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_request_out_of_turn() {
        let mut ctl = controller();
        assert!(matches!(ctl.request_opponent_move(), Err(EngineError::OutOfTurn { .. })));
    }
}
