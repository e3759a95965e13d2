//! Depth-first minimax over every state reachable from the empty board

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::table::{Entry, MemoTable};
use crate::{
    Error, Result,
    tictactoe::{EncodedState, GameValue, Side, classify},
};

/// Summary of a completed solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Value of the empty board under optimal play
    pub root_value: GameValue,
    /// Distinct states classified
    pub states: usize,
    /// Terminal states won by the min side
    pub min_wins: usize,
    /// Terminal states won by the max side
    pub max_wins: usize,
    /// Full boards with no line
    pub ties: usize,
    /// Largest key written to the table
    pub max_key: u32,
    /// Wall-clock build time in milliseconds
    pub elapsed_ms: u128,
}

impl SolveReport {
    pub fn terminal_states(&self) -> usize {
        self.min_wins + self.max_wins + self.ties
    }
}

#[derive(Debug, Default)]
struct Counters {
    states: usize,
    min_wins: usize,
    max_wins: usize,
    ties: usize,
    max_key: u32,
}

impl Counters {
    fn record(&mut self, state: EncodedState, terminal: Option<GameValue>) {
        self.states += 1;
        self.max_key = self.max_key.max(state.key());
        match terminal {
            Some(GameValue::MinWins) => self.min_wins += 1,
            Some(GameValue::MaxWins) => self.max_wins += 1,
            Some(GameValue::Tie) => self.ties += 1,
            None => {}
        }
    }
}

/// Builds the memo table by exhaustive search.
///
/// The memo lookup is keyed on the state alone: with the min side opening,
/// no state is reachable with two different sides to move.
#[derive(Debug, Default)]
pub struct Solver {
    memo: MemoTable,
    counters: Counters,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solve from the empty board with the min side to move.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRangeState` if a reachable key escapes the table, which
    /// means the table is undersized.
    pub fn solve(mut self) -> Result<(MemoTable, SolveReport)> {
        let started = Instant::now();
        let root_value = self.search(EncodedState::EMPTY, Side::Min)?;
        let elapsed_ms = started.elapsed().as_millis();

        let Counters {
            states,
            min_wins,
            max_wins,
            ties,
            max_key,
        } = self.counters;
        let report = SolveReport {
            root_value,
            states,
            min_wins,
            max_wins,
            ties,
            max_key,
            elapsed_ms,
        };
        info!(
            root_value = ?report.root_value,
            states = report.states,
            max_key = report.max_key,
            elapsed_ms = report.elapsed_ms,
            "decision table built"
        );
        Ok((self.memo, report))
    }

    fn search(&mut self, state: EncodedState, to_move: Side) -> Result<GameValue> {
        if let Some(entry) = self.memo.get(state)? {
            return Ok(entry.value);
        }

        if let Some(value) = classify(state).value() {
            self.counters.record(state, Some(value));
            self.memo.insert(state, Entry::terminal(value))?;
            return Ok(value);
        }

        // Strict comparison keeps the lowest cell among equal children.
        let mut best: Option<(GameValue, usize)> = None;
        for cell in state.free_cells() {
            let value = self.search(state.with_cell(to_move, cell), to_move.opponent())?;
            let improves = best.is_none_or(|(incumbent, _)| to_move.prefers(value, incumbent));
            if improves {
                best = Some((value, cell));
            }
        }

        let (value, cell) = best.ok_or(Error::NoValidMoves { key: state.key() })?;
        self.counters.record(state, None);
        self.memo.insert(state, Entry::new(value, cell))?;
        if state.piece_count() <= 1 {
            debug!(%state, ?value, cell, "opening solved");
        }
        Ok(value)
    }
}
