//! Tracked gameplay state shared by the oracle and the game loop

use serde::{Deserialize, Serialize};

use super::{
    encoding::{EncodedState, Side, encode_move},
    lines::{Outcome, classify},
};
use crate::{Error, Result};

/// The board being played and whose turn it is.
///
/// For any state reached through [`GameContext::apply`], `to_move` equals
/// [`EncodedState::side_to_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContext {
    state: EncodedState,
    to_move: Side,
}

impl GameContext {
    /// Empty board with the min side to move
    pub fn new() -> Self {
        Self {
            state: EncodedState::EMPTY,
            to_move: Side::Min,
        }
    }

    pub fn state(&self) -> EncodedState {
        self.state
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Classification of the current state
    pub fn outcome(&self) -> Outcome {
        classify(self.state)
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Number of moves played so far
    pub fn ply(&self) -> u32 {
        self.state.piece_count()
    }

    /// Claim `cell` for the side to move and hand the turn over.
    ///
    /// # Errors
    ///
    /// Returns `GameOver` once the board is terminal, otherwise whatever
    /// [`encode_move`] rejects.
    pub fn apply(&mut self, cell: usize) -> Result<EncodedState> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        self.state = encode_move(self.state, self.to_move, cell)?;
        self.to_move = self.to_move.opponent();
        Ok(self.state)
    }

    /// Back to the empty board with the min side to move
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::new()
    }
}
