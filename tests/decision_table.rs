//! Whole-table properties of the solved game

mod common;

use common::reachable_states;
use ttt_oracle::{
    DecisionTable, EncodedState, Error, GameValue, MAX_REACHABLE_KEY, Outcome, Side,
    tictactoe::{classify, encode_move},
};

#[test]
fn every_reachable_state_is_solved_once() {
    let table = DecisionTable::build().unwrap();
    let reachable = reachable_states();

    assert_eq!(reachable.len(), 5478);
    assert_eq!(table.len(), reachable.len());
    for &state in &reachable {
        assert!(table.lookup(state).is_ok(), "missing {state:?}");
    }
    for (state, _) in table.iter() {
        assert!(reachable.contains(&state), "unreachable {state:?} in table");
    }
}

#[test]
fn keys_stay_within_the_table_bound() {
    let reachable = reachable_states();
    let max_key = reachable.iter().map(|state| state.key()).max().unwrap();
    assert_eq!(max_key, MAX_REACHABLE_KEY);

    let table = DecisionTable::build().unwrap();
    assert_eq!(table.report().max_key, MAX_REACHABLE_KEY);
}

#[test]
fn terminal_counts_match_the_reachable_game() {
    let reachable = reachable_states();
    let count = |outcome: Outcome| {
        reachable
            .iter()
            .filter(|&&state| classify(state) == outcome)
            .count()
    };
    assert_eq!(count(Outcome::MinWins), 626);
    assert_eq!(count(Outcome::MaxWins), 316);
    assert_eq!(count(Outcome::Tie), 16);

    let report = DecisionTable::build().unwrap().report().clone();
    assert_eq!(report.min_wins, 626);
    assert_eq!(report.max_wins, 316);
    assert_eq!(report.ties, 16);
    assert_eq!(report.terminal_states(), 958);
}

#[test]
fn empty_board_is_a_tie() {
    let table = DecisionTable::build().unwrap();
    assert_eq!(table.game_value(), GameValue::Tie);
    assert_eq!(table.value(EncodedState::EMPTY).unwrap(), GameValue::Tie);
    assert_eq!(table.best_move(EncodedState::EMPTY).unwrap(), 0);
}

#[test]
fn best_move_is_free_and_keeps_the_value() {
    let table = DecisionTable::build().unwrap();
    for (state, entry) in table.iter() {
        let outcome = classify(state);
        if outcome.is_terminal() {
            assert_eq!(outcome.value(), Some(entry.value));
            continue;
        }

        let side = state.side_to_move();
        let best = entry.best_move();
        assert!(state.is_free(best), "occupied best move in {state:?}");

        let child = encode_move(state, side, best).unwrap();
        assert_eq!(table.value(child).unwrap(), entry.value);

        for cell in state.free_cells() {
            let value = table.value(encode_move(state, side, cell).unwrap()).unwrap();
            assert!(
                !side.prefers(value, entry.value),
                "cell {cell} beats the stored move in {state:?}"
            );
        }
    }
}

#[test]
fn ties_break_toward_the_lowest_cell() {
    let table = DecisionTable::build().unwrap();
    for (state, entry) in table.iter() {
        if classify(state).is_terminal() {
            continue;
        }
        let side = state.side_to_move();
        let first_optimal = state
            .free_cells()
            .find(|&cell| {
                table.value(encode_move(state, side, cell).unwrap()).unwrap() == entry.value
            })
            .unwrap();
        assert_eq!(entry.best_move(), first_optimal);
    }
}

#[test]
fn single_free_cell_is_the_recommended_move() {
    let table = DecisionTable::build().unwrap();
    for (state, entry) in table.iter() {
        if classify(state).is_terminal() || state.piece_count() != 8 {
            continue;
        }
        let only: Vec<usize> = state.free_cells().collect();
        assert_eq!(only.len(), 1);
        assert_eq!(entry.best_move(), only[0]);
    }
}

#[test]
fn classification_is_stable() {
    for state in reachable_states() {
        assert_eq!(classify(state), classify(state));
    }
}

#[test]
fn column_win_is_classified_for_x() {
    // five X against two O never arises in play, so only the classifier knows it
    let state = EncodedState::from_cells(&[0, 1, 3, 4, 6], &[2, 5]).unwrap();
    assert_eq!(classify(state), Outcome::MinWins);

    let table = DecisionTable::build().unwrap();
    assert!(matches!(
        table.value(state),
        Err(Error::UnknownState { .. })
    ));
}

#[test]
fn reachable_column_win_is_stored_for_x() {
    // X completes 0-3-6 on its fourth move
    let state = EncodedState::from_cells(&[0, 1, 3, 6], &[2, 4, 8]).unwrap();
    assert_eq!(classify(state), Outcome::MinWins);

    let table = DecisionTable::build().unwrap();
    assert_eq!(table.value(state).unwrap(), GameValue::MinWins);
}

#[test]
fn unreachable_and_out_of_range_states_are_rejected() {
    let table = DecisionTable::build().unwrap();

    // O cannot move first
    let unreachable = EncodedState::from_cells(&[], &[4]).unwrap();
    assert!(matches!(
        table.lookup(unreachable),
        Err(Error::UnknownState { .. })
    ));

    let beyond = EncodedState::from_cells(&[0, 1, 2, 3, 4], &[5, 6, 7, 8]).unwrap();
    assert!(matches!(
        table.lookup(beyond),
        Err(Error::OutOfRangeState { .. })
    ));
}

#[test]
fn o_side_to_move_is_derived_from_piece_counts() {
    let state = EncodedState::from_cells(&[4], &[]).unwrap();
    assert_eq!(state.side_to_move(), Side::Max);
    let table = DecisionTable::build().unwrap();
    assert_eq!(table.value(state).unwrap(), GameValue::Tie);
}
