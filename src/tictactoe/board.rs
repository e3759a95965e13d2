//! Text representation of encoded boards

use super::encoding::{CELL_COUNT, EncodedState, Side, encode_move};
use crate::{Error, Result};

/// Glyph for a free cell
pub const EMPTY_GLYPH: char = '.';

fn side_from_char(c: char) -> Option<Option<Side>> {
    match c {
        '.' | '-' | '_' => Some(None),
        'X' | 'x' => Some(Some(Side::Min)),
        'O' | 'o' | '0' => Some(Some(Side::Max)),
        _ => None,
    }
}

/// Parse a board such as `"XX.|O.O|..."` into an encoded state.
///
/// Whitespace and the row separators `|` and `/` are ignored. `X` marks the
/// min side, `O` the max side and `.` a free cell. The piece counts are not
/// checked against alternating play, so unreachable boards parse too.
///
/// # Errors
///
/// Returns error if fewer or more than 9 cells remain after cleaning or any
/// character is not a cell glyph.
pub fn parse_board(s: &str) -> Result<EncodedState> {
    let chars: Vec<char> = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
        .collect();
    if chars.len() != CELL_COUNT {
        return Err(Error::InvalidBoardLength {
            expected: CELL_COUNT,
            got: chars.len(),
            context: s.to_string(),
        });
    }

    let mut state = EncodedState::EMPTY;
    for (position, &character) in chars.iter().enumerate() {
        let owner = side_from_char(character).ok_or_else(|| {
            Error::InvalidCellCharacter {
                character,
                position,
                context: s.to_string(),
            }
        })?;
        if let Some(side) = owner {
            state = encode_move(state, side, position)?;
        }
    }
    Ok(state)
}

fn glyph(state: EncodedState, cell: usize) -> char {
    state.owner(cell).map_or(EMPTY_GLYPH, Side::glyph)
}

/// Compact 9-character label, row-major
pub fn format_label(state: EncodedState) -> String {
    (0..CELL_COUNT).map(|cell| glyph(state, cell)).collect()
}

/// Render a 3x3 grid. Cells listed in `highlight` are wrapped in brackets.
pub fn render_board(state: EncodedState, highlight: Option<[usize; 3]>) -> String {
    let mut rows = Vec::with_capacity(3);
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let cell = row * 3 + col;
                let mark = glyph(state, cell);
                if highlight.is_some_and(|line| line.contains(&cell)) {
                    format!("[{mark}]")
                } else {
                    format!(" {mark} ")
                }
            })
            .collect();
        rows.push(cells.join("|"));
    }
    rows.join("\n---+---+---\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_board_reads_both_sides() {
        let state = parse_board("XX.|O.O|...").unwrap();
        assert_eq!(state.min_cells(), 0b000_000_011);
        assert_eq!(state.max_cells(), 0b000_101_000);
        assert_eq!(format_label(state), "XX.O.O...");
    }

    #[test]
    fn parse_board_rejects_bad_input() {
        assert!(matches!(
            parse_board("XX."),
            Err(Error::InvalidBoardLength { got: 3, .. })
        ));
        assert!(matches!(
            parse_board("XX.Q....."),
            Err(Error::InvalidCellCharacter {
                character: 'Q',
                position: 3,
                ..
            })
        ));
    }

    #[test]
    fn render_highlights_line() {
        let state = parse_board("XXX/OO./...").unwrap();
        let rendered = render_board(state, Some([0, 1, 2]));
        let first_row = rendered.lines().next().unwrap();
        assert_eq!(first_row, "[X]|[X]|[X]");
        assert!(rendered.contains(" O | O | . "));
    }
}
