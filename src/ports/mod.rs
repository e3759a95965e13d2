//! Ports (trait boundaries) between the core and its participants.
//!
//! These traits are owned by the core and implemented by adapters and the
//! pipeline.

pub mod observer;
pub mod opponent;

pub use observer::Observer;
pub use opponent::Opponent;
