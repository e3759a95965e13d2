//! Observer port - hooks into a running match
//!
//! Observers collect progress and metrics without coupling the match runner
//! to any output format.

use crate::{
    Result,
    tictactoe::{EncodedState, Outcome, Side},
};

/// Observer trait for monitoring matches
///
/// # Event Sequence
///
/// 1. `on_match_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num, agent_side)`
///    - `on_move(...)` - For each move in the game
///    - `on_game_end(game_num, outcome, agent_side)`
/// 3. `on_match_end()` - Once at the end
pub trait Observer {
    /// Called when the match starts.
    fn on_match_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts. `agent_side` is the side the first
    /// participant plays in this game.
    fn on_game_start(&mut self, _game_num: usize, _agent_side: Side) -> Result<()> {
        Ok(())
    }

    /// Called after each move has been applied.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the current game
    /// * `side` - Side that moved
    /// * `cell` - Cell that was taken
    /// * `state` - Board after the move
    fn on_move(
        &mut self,
        _game_num: usize,
        _side: Side,
        _cell: usize,
        _state: EncodedState,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches a terminal state.
    ///
    /// `agent_side` is repeated so outcome-based observers need no per-game
    /// state.
    fn on_game_end(&mut self, _game_num: usize, _outcome: Outcome, _agent_side: Side) -> Result<()> {
        Ok(())
    }

    /// Called when the match completes.
    fn on_match_end(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_match_start(&mut self, total_games: usize) -> Result<()> {
        (**self).on_match_start(total_games)
    }

    fn on_game_start(&mut self, game_num: usize, agent_side: Side) -> Result<()> {
        (**self).on_game_start(game_num, agent_side)
    }

    fn on_move(
        &mut self,
        game_num: usize,
        side: Side,
        cell: usize,
        state: EncodedState,
    ) -> Result<()> {
        (**self).on_move(game_num, side, cell, state)
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome, agent_side: Side) -> Result<()> {
        (**self).on_game_end(game_num, outcome, agent_side)
    }

    fn on_match_end(&mut self) -> Result<()> {
        (**self).on_match_end()
    }
}
