//! Winning lines and terminal classification

use serde::{Deserialize, Serialize};

use super::encoding::{EncodedState, FIELD_MASK, Side};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

const fn line_mask(line: [usize; 3]) -> u32 {
    (1 << line[0]) | (1 << line[1]) | (1 << line[2])
}

/// The winning lines as 9-bit masks, same order as [`WINNING_LINES`]
pub const LINE_MASKS: [u32; 8] = {
    let mut masks = [0u32; 8];
    let mut i = 0;
    while i < WINNING_LINES.len() {
        masks[i] = line_mask(WINNING_LINES[i]);
        i += 1;
    }
    masks
};

/// Game value under optimal play, ordered so the min side seeks the smallest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum GameValue {
    MinWins = 0,
    Tie = 1,
    MaxWins = 2,
}

impl GameValue {
    /// Numeric value stored in the memo table
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<GameValue> {
        match value {
            0 => Some(GameValue::MinWins),
            1 => Some(GameValue::Tie),
            2 => Some(GameValue::MaxWins),
            _ => None,
        }
    }

    /// The side this value is a win for
    pub fn winner(self) -> Option<Side> {
        match self {
            GameValue::MinWins => Some(Side::Min),
            GameValue::MaxWins => Some(Side::Max),
            GameValue::Tie => None,
        }
    }
}

/// Classification of a single state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    MinWins,
    Tie,
    MaxWins,
    NonTerminal,
}

impl Outcome {
    /// The terminal value, or `None` while play continues
    pub fn value(self) -> Option<GameValue> {
        match self {
            Outcome::MinWins => Some(GameValue::MinWins),
            Outcome::Tie => Some(GameValue::Tie),
            Outcome::MaxWins => Some(GameValue::MaxWins),
            Outcome::NonTerminal => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != Outcome::NonTerminal
    }
}

/// Whether a 9-bit field completes any winning line
pub fn has_line(field: u32) -> bool {
    LINE_MASKS.iter().any(|&mask| field & mask == mask)
}

/// Classify a state.
///
/// Min lines are checked first, then max lines. A full board only counts as a
/// tie when neither side completed a line.
pub fn classify(state: EncodedState) -> Outcome {
    if has_line(state.min_cells()) {
        Outcome::MinWins
    } else if has_line(state.max_cells()) {
        Outcome::MaxWins
    } else if state.occupied() == FIELD_MASK {
        Outcome::Tie
    } else {
        Outcome::NonTerminal
    }
}

/// The first completed line and its owner, checked in the same order as
/// [`classify`]
pub fn winning_line(state: EncodedState) -> Option<(Side, [usize; 3])> {
    [Side::Min, Side::Max].into_iter().find_map(|side| {
        let field = state.cells_of(side);
        WINNING_LINES
            .iter()
            .zip(LINE_MASKS)
            .find(|&(_, mask)| field & mask == mask)
            .map(|(line, _)| (side, *line))
    })
}

/// Cells that would complete a line for `side` on its next move
pub fn winning_moves(state: EncodedState, side: Side) -> Vec<usize> {
    let field = state.cells_of(side);
    state
        .free_cells()
        .filter(|&cell| has_line(field | 1 << cell))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(min: &[usize], max: &[usize]) -> EncodedState {
        EncodedState::from_cells(min, max).unwrap()
    }

    #[test]
    fn every_line_wins_for_its_owner() {
        for line in WINNING_LINES {
            let min_line = state(&line, &[]);
            assert_eq!(classify(min_line), Outcome::MinWins, "line {line:?}");

            let max_line = state(&[], &line);
            assert_eq!(classify(max_line), Outcome::MaxWins, "line {line:?}");
        }
    }

    #[test]
    fn full_board_without_line_is_tie() {
        // X O X
        // X O O
        // O X X
        let board = state(&[0, 2, 3, 7, 8], &[1, 4, 5, 6]);
        assert_eq!(classify(board), Outcome::Tie);
    }

    #[test]
    fn win_takes_priority_over_full_board() {
        // X X X
        // O O X
        // X O O
        let board = state(&[0, 1, 2, 5, 6], &[3, 4, 7, 8]);
        assert_eq!(classify(board), Outcome::MinWins);
    }

    #[test]
    fn open_board_is_non_terminal() {
        assert_eq!(classify(EncodedState::EMPTY), Outcome::NonTerminal);
        assert_eq!(classify(state(&[4], &[0])), Outcome::NonTerminal);
    }

    #[test]
    fn winning_line_reports_owner() {
        let board = state(&[0, 1, 3, 4, 6], &[2, 5]);
        assert_eq!(winning_line(board), Some((Side::Min, [0, 3, 6])));
        assert_eq!(winning_line(state(&[0, 1], &[3, 4, 5])), Some((Side::Max, [3, 4, 5])));
        assert_eq!(winning_line(state(&[0], &[4])), None);
    }

    #[test]
    fn test_winning_moves_multiple() {
        // XX.
        // X..
        // ...
        let board = state(&[0, 1, 3], &[]);
        assert_eq!(winning_moves(board, Side::Min), vec![2, 6]);
        assert!(winning_moves(board, Side::Max).is_empty());
    }

    #[test]
    fn game_values_are_ordered() {
        assert!(GameValue::MinWins < GameValue::Tie);
        assert!(GameValue::Tie < GameValue::MaxWins);
        for raw in 0..3 {
            assert_eq!(GameValue::from_u8(raw).map(GameValue::as_u8), Some(raw));
        }
        assert_eq!(GameValue::from_u8(3), None);
    }
}
