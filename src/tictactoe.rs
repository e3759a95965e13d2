//! Tic-Tac-Toe board encoding, classification and text format

pub mod board;
pub mod context;
pub mod encoding;
pub mod lines;

pub use board::{format_label, parse_board, render_board};
pub use context::GameContext;
pub use encoding::{CELL_COUNT, ENCODING_LIMIT, EncodedState, FIELD_MASK, Side, encode_move};
pub use lines::{
    GameValue, LINE_MASKS, Outcome, WINNING_LINES, classify, has_line, winning_line,
    winning_moves,
};
