//! Write-once memo table keyed by encoded state

use serde::Serialize;

use crate::{
    Error, Result,
    tictactoe::{EncodedState, GameValue},
};

/// Largest key reachable from the empty board under alternating play with
/// the min side opening. Confirmed by exhaustive enumeration in the tests.
pub const MAX_REACHABLE_KEY: u32 = 245_790;

/// Number of addressable slots
pub const TABLE_LEN: usize = MAX_REACHABLE_KEY as usize + 1;

const VACANT: u8 = 0xFF;

/// A solved state: its minimax value and a best move for the side to move.
///
/// Terminal states carry move 0; it is never played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub value: GameValue,
    pub best_move: u8,
}

impl Entry {
    pub fn new(value: GameValue, best_move: usize) -> Self {
        debug_assert!(best_move < 9);
        Self {
            value,
            best_move: best_move as u8,
        }
    }

    pub fn terminal(value: GameValue) -> Self {
        Self::new(value, 0)
    }

    /// Value in the high nibble, move in the low nibble
    pub fn pack(self) -> u8 {
        self.value.as_u8() << 4 | self.best_move
    }

    pub fn unpack(byte: u8) -> Option<Entry> {
        let value = GameValue::from_u8(byte >> 4)?;
        let best_move = byte & 0x0F;
        (best_move < 9).then_some(Entry { value, best_move })
    }

    pub fn best_move(self) -> usize {
        self.best_move as usize
    }
}

/// Flat array of packed entries indexed by the encoded state
#[derive(Debug, Clone)]
pub struct MemoTable {
    slots: Vec<u8>,
    filled: usize,
}

impl MemoTable {
    pub fn new() -> Self {
        Self {
            slots: vec![VACANT; TABLE_LEN],
            filled: 0,
        }
    }

    fn slot(state: EncodedState) -> Result<usize> {
        let key = state.key();
        if key > MAX_REACHABLE_KEY {
            return Err(Error::OutOfRangeState {
                key,
                limit: MAX_REACHABLE_KEY,
            });
        }
        Ok(key as usize)
    }

    /// Look up a state.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRangeState` if the key lies beyond the table.
    pub fn get(&self, state: EncodedState) -> Result<Option<Entry>> {
        let index = Self::slot(state)?;
        Ok(self.slots.get(index).copied().and_then(Entry::unpack))
    }

    /// Record the entry for a state. Each slot may be written once.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRangeState` for a key beyond the table and
    /// `TableConflict` if the slot already holds an entry.
    pub fn insert(&mut self, state: EncodedState, entry: Entry) -> Result<()> {
        let index = Self::slot(state)?;
        let slot = self.slots.get_mut(index).ok_or(Error::OutOfRangeState {
            key: state.key(),
            limit: MAX_REACHABLE_KEY,
        })?;
        if *slot != VACANT {
            return Err(Error::TableConflict { key: state.key() });
        }
        *slot = entry.pack();
        self.filled += 1;
        Ok(())
    }

    /// Number of written entries
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Written entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (EncodedState, Entry)> + '_ {
        self.slots.iter().enumerate().filter_map(|(key, &byte)| {
            let entry = Entry::unpack(byte)?;
            let state = EncodedState::from_raw(key as u32).ok()?;
            Some((state, entry))
        })
    }
}

impl Default for MemoTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_packs_value_and_move() {
        let entry = Entry::new(GameValue::MaxWins, 7);
        assert_eq!(entry.pack(), 0x27);
        assert_eq!(Entry::unpack(0x27), Some(entry));
        assert_eq!(Entry::unpack(VACANT), None);
    }

    #[test]
    fn insert_is_write_once() {
        let mut table = MemoTable::new();
        let state = EncodedState::from_raw(0b1).unwrap();
        table.insert(state, Entry::new(GameValue::Tie, 4)).unwrap();
        assert!(matches!(
            table.insert(state, Entry::new(GameValue::Tie, 4)),
            Err(Error::TableConflict { key: 1 })
        ));
        assert_eq!(table.get(state).unwrap(), Some(Entry::new(GameValue::Tie, 4)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn keys_past_the_bound_are_rejected() {
        let table = MemoTable::new();
        // both lines complete, so no game reaches it
        let state = EncodedState::from_cells(&[0, 1, 2, 3, 4], &[5, 6, 7, 8]).unwrap();
        assert_eq!(state.key(), MAX_REACHABLE_KEY + 1);
        assert!(matches!(
            table.get(state),
            Err(Error::OutOfRangeState { limit: MAX_REACHABLE_KEY, .. })
        ));
    }
}
