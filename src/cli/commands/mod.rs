//! Subcommands of the `ttt-oracle` binary

pub mod evaluate;
pub mod lookup;
pub mod play;
pub mod solve;
