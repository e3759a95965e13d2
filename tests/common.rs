//! Common test utilities for the decision-table test suite.

#![allow(dead_code)]

use std::collections::BTreeSet;

use ttt_oracle::{
    EncodedState,
    tictactoe::{classify, encode_move},
};

/// Every state reachable from the empty board by legal play, found by a
/// depth-first walk that stops at terminal states.
pub fn reachable_states() -> BTreeSet<EncodedState> {
    fn walk(state: EncodedState, seen: &mut BTreeSet<EncodedState>) {
        if !seen.insert(state) || classify(state).is_terminal() {
            return;
        }
        let side = state.side_to_move();
        for cell in state.free_cells() {
            let next = encode_move(state, side, cell).expect("free cell must be playable");
            walk(next, seen);
        }
    }

    let mut seen = BTreeSet::new();
    walk(EncodedState::EMPTY, &mut seen);
    seen
}
