//! Exhaustive tic-tac-toe decision table with a skill-controlled AI
//!
//! This crate provides:
//! - Bit-packed board encoding and terminal classification
//! - A minimax solver that memoizes every reachable state once
//! - A move selector that plays the optimal move with a given probability
//! - The [`Oracle`] facade a game loop drives, plus opponents and a match runner
//! - The `ttt-oracle` command-line interface

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod oracle;
pub mod pipeline;
pub mod ports;
pub mod selector;
pub mod solver;
pub mod tictactoe;

pub use config::OracleConfig;
pub use error::{Error, Result};
pub use oracle::Oracle;
pub use selector::{DegradedPolicy, MoveSelector, Skill};
pub use solver::{DecisionTable, Entry, MAX_REACHABLE_KEY, SolveReport, Solver};
pub use tictactoe::{EncodedState, GameContext, GameValue, Outcome, Side};
