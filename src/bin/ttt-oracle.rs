//! ttt-oracle - Exhaustive tic-tac-toe decision table with a tunable AI
//!
//! This CLI provides a unified interface for:
//! - Solving every reachable position and exporting the table
//! - Looking up the value and best move of a position
//! - Playing against the AI at a chosen skill
//! - Evaluating the AI against baseline opponents

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ttt_oracle::cli::commands::{evaluate, lookup, play, solve};

#[derive(Parser)]
#[command(name = "ttt-oracle")]
#[command(version, about = "Tic-tac-toe decision table and skill-controlled AI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve every reachable position
    Solve(solve::SolveArgs),

    /// Look up the value and best move of a position
    Lookup(lookup::LookupArgs),

    /// Play against the AI
    Play(play::PlayArgs),

    /// Evaluate the AI against a baseline opponent
    Evaluate(evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => solve::execute(args),
        Commands::Lookup(args) => lookup::execute(args),
        Commands::Play(args) => play::execute(args),
        Commands::Evaluate(args) => evaluate::execute(args),
    }
}
