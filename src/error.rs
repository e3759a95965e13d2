//! Error types for the decision-table crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("encoded state {key:#x} is outside the addressable range (limit {limit:#x})")]
    OutOfRangeState { key: u32, limit: u32 },

    #[error("invalid move: position {position} is already occupied")]
    InvalidMove { position: usize },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("decision table queried before initialize() completed")]
    QueryBeforeInitialize,

    #[error("encoded state {key:#x} claims cells for both sides (overlap mask {overlap:#05x})")]
    OverlappingCells { key: u32, overlap: u32 },

    #[error("memo entry for state {key:#x} is already written")]
    TableConflict { key: u32 },

    #[error("state {key:#x} is not in the decision table")]
    UnknownState { key: u32 },

    #[error("game already over")]
    GameOver,

    #[error("no free cell available in state {key:#x}")]
    NoValidMoves { key: u32 },

    #[error("skill {value} must be a probability in [0.0, 1.0]")]
    InvalidSkill { value: f64 },

    #[error("board string too short: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
