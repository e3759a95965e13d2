//! The interface the game loop drives: build once, then answer move queries.

use std::sync::Arc;

use tracing::warn;

use crate::{
    Error, Result,
    config::OracleConfig,
    selector::{MoveSelector, Skill},
    solver::{DecisionTable, Entry, SolveReport},
    tictactoe::{EncodedState, GameContext, Outcome},
};

/// Decision-table AI plus the game it is tracking.
///
/// The table is built by [`Oracle::initialize`] and never recomputed;
/// [`Oracle::reset`] only clears the tracked board. Every move, human or AI,
/// goes through the oracle so the tracked state stays in sync with the game
/// loop.
#[derive(Debug, Clone)]
pub struct Oracle {
    table: Option<Arc<DecisionTable>>,
    context: GameContext,
    selector: MoveSelector,
}

impl Oracle {
    /// Create an uninitialized oracle
    pub fn new(config: &OracleConfig) -> Self {
        let selector = match config.seed {
            Some(seed) => MoveSelector::with_seed(config.degraded, seed),
            None => MoveSelector::new(config.degraded),
        };
        Self {
            table: None,
            context: GameContext::new(),
            selector,
        }
    }

    /// Create an oracle around a table that was already built
    pub fn with_table(table: Arc<DecisionTable>, config: &OracleConfig) -> Self {
        let mut oracle = Self::new(config);
        oracle.table = Some(table);
        oracle
    }

    /// Build the full decision table. A second call keeps the existing table.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRangeState` if the table cannot address a reachable state.
    pub fn initialize(&mut self) -> Result<&SolveReport> {
        let table = match self.table.take() {
            Some(table) => table,
            None => Arc::new(DecisionTable::build()?),
        };
        Ok(self.table.insert(table).report())
    }

    pub fn is_initialized(&self) -> bool {
        self.table.is_some()
    }

    /// The built table.
    ///
    /// # Errors
    ///
    /// Returns `QueryBeforeInitialize` until [`Oracle::initialize`] succeeds.
    pub fn table(&self) -> Result<&DecisionTable> {
        self.table.as_deref().ok_or(Error::QueryBeforeInitialize)
    }

    /// Shared handle to the table, for building further oracles
    pub fn shared_table(&self) -> Option<Arc<DecisionTable>> {
        self.table.clone()
    }

    /// Record a move made by the externally controlled side.
    ///
    /// # Errors
    ///
    /// Returns `QueryBeforeInitialize` before the table exists, `GameOver`
    /// after a terminal state, and `InvalidMove`/`InvalidPosition` for a cell
    /// that cannot be taken.
    pub fn notify_external_move(&mut self, cell: usize) -> Result<()> {
        self.table()?;
        self.context.apply(cell)?;
        Ok(())
    }

    /// Pick, apply and return the AI move for the side to move.
    ///
    /// # Errors
    ///
    /// Returns `QueryBeforeInitialize` before the table exists and `GameOver`
    /// once the board is terminal.
    pub fn request_ai_move(&mut self, skill: Skill) -> Result<usize> {
        let table = self.table.as_deref().ok_or(Error::QueryBeforeInitialize)?;
        self.selector
            .select_move(table, &mut self.context, skill)
            .inspect_err(|err| {
                if let Error::OutOfRangeState { key, limit } = err {
                    warn!(key, limit, "tracked state fell outside the decision table");
                }
            })
    }

    /// Start a fresh game on the same table
    pub fn reset(&mut self) {
        self.context.reset();
    }

    /// Reseed the AI's random source
    pub fn reseed(&mut self, seed: u64) {
        self.selector.set_rng_seed(seed);
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    pub fn state(&self) -> EncodedState {
        self.context.state()
    }

    pub fn outcome(&self) -> Outcome {
        self.context.outcome()
    }

    /// Table entry for an arbitrary reachable state
    pub fn evaluate(&self, state: EncodedState) -> Result<Entry> {
        self.table()?.lookup(state)
    }
}
