//! Bit-packed board encoding
//!
//! A board is a single integer holding two disjoint 9-bit fields: the low
//! nine bits are the cells of the min side, the next nine bits are the cells
//! of the max side. The min side always opens from the empty board.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// Mask covering one side's 9-bit field
pub const FIELD_MASK: u32 = 0x1FF;

/// Exclusive upper bound of any value the 18-bit encoding can produce
pub const ENCODING_LIMIT: u32 = 1 << (2 * CELL_COUNT);

/// One of the two players, named by the direction it pushes the game value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Opens the game and seeks the smallest value (written `X`)
    Min,
    /// Moves second and seeks the largest value (written `O`)
    Max,
}

impl Side {
    /// Field index of this side: 0 for min, 1 for max
    pub fn index(self) -> u32 {
        match self {
            Side::Min => 0,
            Side::Max => 1,
        }
    }

    /// Get the other side
    pub fn opponent(self) -> Side {
        match self {
            Side::Min => Side::Max,
            Side::Max => Side::Min,
        }
    }

    /// Whether `candidate` is strictly better than `incumbent` for this side
    pub fn prefers<T: Ord>(self, candidate: T, incumbent: T) -> bool {
        match self {
            Side::Min => candidate < incumbent,
            Side::Max => candidate > incumbent,
        }
    }

    /// Board glyph used in text labels
    pub fn glyph(self) -> char {
        match self {
            Side::Min => 'X',
            Side::Max => 'O',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Min => write!(f, "min (X)"),
            Side::Max => write!(f, "max (O)"),
        }
    }
}

/// Board configuration packed into one integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct EncodedState(u32);

impl EncodedState {
    /// The empty board
    pub const EMPTY: EncodedState = EncodedState(0);

    /// Validate a raw key.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRangeState` if the key uses bits beyond the two fields and
    /// `OverlappingCells` if a cell is claimed by both sides.
    pub fn from_raw(key: u32) -> Result<Self> {
        if key >= ENCODING_LIMIT {
            return Err(Error::OutOfRangeState {
                key,
                limit: ENCODING_LIMIT - 1,
            });
        }
        let overlap = (key & FIELD_MASK) & (key >> CELL_COUNT);
        if overlap != 0 {
            return Err(Error::OverlappingCells { key, overlap });
        }
        Ok(EncodedState(key))
    }

    /// Build a state from two cell lists.
    ///
    /// # Errors
    ///
    /// Returns an error if a cell is out of range or listed twice.
    pub fn from_cells(min_cells: &[usize], max_cells: &[usize]) -> Result<Self> {
        let mut state = EncodedState::EMPTY;
        for &cell in min_cells {
            state = encode_move(state, Side::Min, cell)?;
        }
        for &cell in max_cells {
            state = encode_move(state, Side::Max, cell)?;
        }
        Ok(state)
    }

    /// The raw integer key
    pub fn key(self) -> u32 {
        self.0
    }

    /// Cells held by the min side
    pub fn min_cells(self) -> u32 {
        self.0 & FIELD_MASK
    }

    /// Cells held by the max side
    pub fn max_cells(self) -> u32 {
        (self.0 >> CELL_COUNT) & FIELD_MASK
    }

    /// Cells held by `side`
    pub fn cells_of(self, side: Side) -> u32 {
        match side {
            Side::Min => self.min_cells(),
            Side::Max => self.max_cells(),
        }
    }

    /// Union of both fields
    pub fn occupied(self) -> u32 {
        self.min_cells() | self.max_cells()
    }

    /// Count of occupied cells
    pub fn piece_count(self) -> u32 {
        self.occupied().count_ones()
    }

    /// Whether `cell` is held by neither side
    pub fn is_free(self, cell: usize) -> bool {
        cell < CELL_COUNT && self.occupied() & (1 << cell) == 0
    }

    /// Which side holds `cell`, if any
    pub fn owner(self, cell: usize) -> Option<Side> {
        if cell >= CELL_COUNT {
            None
        } else if self.min_cells() & (1 << cell) != 0 {
            Some(Side::Min)
        } else if self.max_cells() & (1 << cell) != 0 {
            Some(Side::Max)
        } else {
            None
        }
    }

    /// Free cells in ascending index order
    pub fn free_cells(self) -> impl Iterator<Item = usize> {
        (0..CELL_COUNT).filter(move |&cell| self.is_free(cell))
    }

    /// Side to move under alternating play with the min side opening.
    ///
    /// Equal popcounts mean the min side moves next.
    pub fn side_to_move(self) -> Side {
        if self.min_cells().count_ones() == self.max_cells().count_ones() {
            Side::Min
        } else {
            Side::Max
        }
    }

    /// Set a cell for `side` without validating it. The caller must know the
    /// cell is free.
    pub(crate) fn with_cell(self, side: Side, cell: usize) -> Self {
        EncodedState(self.0 | 1 << (CELL_COUNT as u32 * side.index() + cell as u32))
    }
}

impl fmt::Display for EncodedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#07x}", self.0)
    }
}

impl<'de> Deserialize<'de> for EncodedState {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let key = u32::deserialize(deserializer)?;
        EncodedState::from_raw(key).map_err(serde::de::Error::custom)
    }
}

/// Claim `cell` for `side`, setting bit `9 * side + cell`.
///
/// # Errors
///
/// Returns `InvalidPosition` for a cell index above 8 and `InvalidMove` when
/// either side already holds the cell.
#[must_use = "encode_move returns a new state; the original is unchanged"]
pub fn encode_move(state: EncodedState, side: Side, cell: usize) -> Result<EncodedState> {
    if cell >= CELL_COUNT {
        return Err(Error::InvalidPosition { position: cell });
    }
    if !state.is_free(cell) {
        return Err(Error::InvalidMove { position: cell });
    }
    Ok(state.with_cell(side, cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_move_sets_side_bit() {
        let state = encode_move(EncodedState::EMPTY, Side::Min, 4).unwrap();
        assert_eq!(state.key(), 1 << 4);

        let state = encode_move(state, Side::Max, 0).unwrap();
        assert_eq!(state.key(), (1 << 4) | (1 << 9));
        assert_eq!(state.min_cells(), 0b000_010_000);
        assert_eq!(state.max_cells(), 0b000_000_001);
    }

    #[test]
    fn encode_move_rejects_occupied_cells() {
        let state = encode_move(EncodedState::EMPTY, Side::Min, 2).unwrap();
        assert!(matches!(
            encode_move(state, Side::Max, 2),
            Err(Error::InvalidMove { position: 2 })
        ));
        assert!(matches!(
            encode_move(state, Side::Min, 2),
            Err(Error::InvalidMove { position: 2 })
        ));
    }

    #[test]
    fn encode_move_rejects_out_of_bounds() {
        assert!(matches!(
            encode_move(EncodedState::EMPTY, Side::Max, 9),
            Err(Error::InvalidPosition { position: 9 })
        ));
    }

    #[test]
    fn from_raw_validates_range_and_overlap() {
        assert!(EncodedState::from_raw(ENCODING_LIMIT - 1).is_err());
        assert!(matches!(
            EncodedState::from_raw(ENCODING_LIMIT),
            Err(Error::OutOfRangeState { .. })
        ));
        assert!(matches!(
            EncodedState::from_raw(1 | 1 << 9),
            Err(Error::OverlappingCells { overlap: 1, .. })
        ));
        assert_eq!(EncodedState::from_raw(0b11).unwrap().min_cells(), 0b11);
    }

    #[test]
    fn side_to_move_follows_popcount() {
        let mut state = EncodedState::EMPTY;
        assert_eq!(state.side_to_move(), Side::Min);
        state = encode_move(state, Side::Min, 0).unwrap();
        assert_eq!(state.side_to_move(), Side::Max);
        state = encode_move(state, Side::Max, 8).unwrap();
        assert_eq!(state.side_to_move(), Side::Min);
    }

    #[test]
    fn free_cells_are_ascending() {
        let state = EncodedState::from_cells(&[0, 4], &[8]).unwrap();
        let free: Vec<usize> = state.free_cells().collect();
        assert_eq!(free, vec![1, 2, 3, 5, 6, 7]);
        assert_eq!(state.owner(4), Some(Side::Min));
        assert_eq!(state.owner(8), Some(Side::Max));
        assert_eq!(state.owner(1), None);
    }

    #[test]
    fn prefers_is_strict() {
        assert!(Side::Min.prefers(0, 1));
        assert!(!Side::Min.prefers(1, 1));
        assert!(Side::Max.prefers(2, 1));
        assert!(!Side::Max.prefers(1, 1));
    }
}
