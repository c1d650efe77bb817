//! Rule-based move selection for the games that do not search.
//!
//! Selectors look only at the current legal moves; there is no lookahead.
//! Each returns `None` when the side to move has nothing to play, which the
//! turn controller reports as a pass.

pub mod cards;
pub mod domino;
