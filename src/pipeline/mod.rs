//! Match pipeline
//!
//! This module provides:
//! - A match runner playing complete games through the oracle
//! - Observers recording progress, metrics and game logs

pub mod matches;
pub mod observers;

pub use matches::{FirstMover, GameResult, MatchConfig, MatchRunner, MatchSummary};
pub use observers::{GameRecord, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver};

pub use crate::ports::{Observer, Opponent};
