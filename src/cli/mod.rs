//! CLI infrastructure for the tic-tac-toe oracle
//!
//! This module provides the command-line interface for solving the game,
//! looking up positions, playing interactively and evaluating the AI.

pub mod commands;
pub mod config;
pub mod output;
