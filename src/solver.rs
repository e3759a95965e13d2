//! Exhaustive decision table
//!
//! The table is built once by [`Solver`] and is read-only afterwards. It is
//! `Send + Sync`, so one build can be shared behind an `Arc` by any number of
//! selectors.

pub mod table;
pub mod tree;

pub use table::{Entry, MAX_REACHABLE_KEY, MemoTable, TABLE_LEN};
pub use tree::{SolveReport, Solver};

use crate::{
    Error, Result,
    tictactoe::{EncodedState, GameValue},
};

/// Solved memo table plus the report of the build that produced it
#[derive(Debug, Clone)]
pub struct DecisionTable {
    memo: MemoTable,
    report: SolveReport,
}

impl DecisionTable {
    /// Run the solver over the full reachable state space.
    ///
    /// # Errors
    ///
    /// Fails only if the table is too small for a reachable state.
    pub fn build() -> Result<Self> {
        let (memo, report) = Solver::new().solve()?;
        Ok(Self { memo, report })
    }

    /// Entry for a reachable state.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRangeState` past the table bound and `UnknownState` for
    /// a state the solver never reached.
    pub fn lookup(&self, state: EncodedState) -> Result<Entry> {
        self.memo.get(state)?.ok_or(Error::UnknownState { key: state.key() })
    }

    pub fn value(&self, state: EncodedState) -> Result<GameValue> {
        self.lookup(state).map(|entry| entry.value)
    }

    pub fn best_move(&self, state: EncodedState) -> Result<usize> {
        self.lookup(state).map(Entry::best_move)
    }

    /// Value of the empty board
    pub fn game_value(&self) -> GameValue {
        self.report.root_value
    }

    pub fn report(&self) -> &SolveReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    /// Every solved state with its entry, in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (EncodedState, Entry)> + '_ {
        self.memo.iter()
    }
}
