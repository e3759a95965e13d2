//! Lookup command - Classify a position and show the recommended move

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    DecisionTable, GameValue, Outcome, Side,
    cli::output::{create_spinner, print_kv},
    tictactoe::{classify, format_label, parse_board, render_board, winning_line},
};

#[derive(Parser, Debug)]
#[command(about = "Look up a position in the decision table")]
pub struct LookupArgs {
    /// Board as 9 cells in row-major order, e.g. "X.O/.X./..O"
    pub board: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct LookupResult {
    board: String,
    key: u32,
    outcome: Outcome,
    to_move: Option<Side>,
    value: GameValue,
    best_move: Option<usize>,
}

pub fn execute(args: LookupArgs) -> Result<()> {
    let state = parse_board(&args.board).context("Invalid board")?;

    let spinner = create_spinner("Solving the game tree...")?;
    let table = DecisionTable::build()?;
    spinner.finish_and_clear();

    let entry = table
        .lookup(state)
        .with_context(|| format!("Position {} is not reachable", format_label(state)))?;
    let outcome = classify(state);
    let result = LookupResult {
        board: format_label(state),
        key: state.key(),
        outcome,
        to_move: (!outcome.is_terminal()).then(|| state.side_to_move()),
        value: entry.value,
        best_move: (!outcome.is_terminal()).then(|| entry.best_move()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let highlight = winning_line(state).map(|(_, line)| line);
    println!("{}\n", render_board(state, highlight));
    print_kv("Key", &result.key.to_string());
    print_kv("Outcome", &format!("{outcome:?}"));
    print_kv("Value", &format!("{:?}", result.value));
    if let (Some(side), Some(cell)) = (result.to_move, result.best_move) {
        print_kv("To move", &side.to_string());
        print_kv("Best move", &cell.to_string());
    }
    Ok(())
}
