//! Solve command - Build the decision table and report on it

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    DecisionTable, GameValue, MAX_REACHABLE_KEY, SolveReport,
    cli::output::{create_spinner, format_number, print_kv, print_section, print_subsection},
    solver::TABLE_LEN,
    tictactoe::format_label,
};

#[derive(Parser, Debug)]
#[command(about = "Solve every reachable position")]
pub struct SolveArgs {
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Export the report and every solved position to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Serialize)]
struct TableExport<'a> {
    report: &'a SolveReport,
    table_len: usize,
    positions: Vec<PositionRecord>,
}

#[derive(Serialize)]
struct PositionRecord {
    key: u32,
    board: String,
    value: GameValue,
    best_move: usize,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let spinner = create_spinner("Solving the game tree...")?;
    let table = DecisionTable::build()?;
    spinner.finish_and_clear();

    let report = table.report();
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(report);
    }

    if let Some(path) = &args.export {
        export_table(&table, path)?;
        println!("\n✓ Table exported to: {}", path.display());
    }
    Ok(())
}

fn print_report(report: &SolveReport) {
    print_section("Decision Table");
    print_kv("Game value", &format!("{:?}", report.root_value));
    print_kv("States solved", &format_number(report.states));
    print_kv("Build time", &format!("{} ms", report.elapsed_ms));

    print_subsection("Terminal States");
    print_kv("X wins", &format_number(report.min_wins));
    print_kv("O wins", &format_number(report.max_wins));
    print_kv("Ties", &format_number(report.ties));
    print_kv("Total", &format_number(report.terminal_states()));

    print_subsection("Storage");
    print_kv("Largest key", &format_number(report.max_key as usize));
    print_kv("Key bound", &format_number(MAX_REACHABLE_KEY as usize));
    print_kv("Table slots", &format_number(TABLE_LEN));
}

fn export_table(table: &DecisionTable, path: &Path) -> Result<()> {
    let export = TableExport {
        report: table.report(),
        table_len: TABLE_LEN,
        positions: table
            .iter()
            .map(|(state, entry)| PositionRecord {
                key: state.key(),
                board: format_label(state),
                value: entry.value,
                best_move: entry.best_move(),
            })
            .collect(),
    };

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &export)?;
    Ok(())
}
