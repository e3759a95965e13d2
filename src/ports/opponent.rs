//! Opponent port - abstraction over whoever makes the next move
//!
//! The match runner and the interactive game loop only see this trait, so a
//! table-driven AI, a random baseline and a human at the terminal are
//! interchangeable on either side of the board.

use crate::{Oracle, Result};

/// A participant that chooses and applies moves through an [`Oracle`].
///
/// # Examples
///
/// ```no_run
/// use ttt_oracle::{Oracle, ports::Opponent};
///
/// struct CornerFirst;
///
/// impl Opponent for CornerFirst {
///     fn play(&mut self, oracle: &mut Oracle) -> ttt_oracle::Result<usize> {
///         let cell = oracle
///             .state()
///             .free_cells()
///             .next()
///             .ok_or(ttt_oracle::Error::GameOver)?;
///         oracle.notify_external_move(cell)?;
///         Ok(cell)
///     }
///
///     fn name(&self) -> &str {
///         "corner-first"
///     }
/// }
/// ```
pub trait Opponent {
    /// Choose a cell for the side to move, apply it to the oracle's tracked
    /// game and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is already over or the oracle rejects
    /// the move.
    fn play(&mut self, oracle: &mut Oracle) -> Result<usize>;

    /// Used for identification in summaries and logging.
    fn name(&self) -> &str;

    /// Seed the opponent's internal random number generator.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for deterministic opponents.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
