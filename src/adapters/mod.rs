//! Adapters implementing the opponent port.

pub mod human;
pub mod opponents;

pub use human::HumanOpponent;
pub use opponents::{DefensiveOpponent, RandomOpponent, TableOpponent};
