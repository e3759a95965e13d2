//! Play command - Interactive games against the oracle

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::Rng;

use crate::{
    Error, Oracle, Outcome, Side,
    adapters::{HumanOpponent, TableOpponent},
    cli::{
        config::OracleArgs,
        output::{create_spinner, print_kv, print_section},
    },
    ports::Opponent,
    tictactoe::{render_board, winning_line},
};

/// Who opens each game
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Starter {
    Human,
    Ai,
    /// Drawn again before every game
    Random,
}

impl Starter {
    /// Side the human plays in the next game
    fn human_side(self, rng: &mut impl Rng) -> Side {
        match self {
            Starter::Human => Side::Min,
            Starter::Ai => Side::Max,
            Starter::Random if rng.random_bool(0.5) => Side::Min,
            Starter::Random => Side::Max,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Play against the oracle in the terminal")]
pub struct PlayArgs {
    #[command(flatten)]
    pub oracle: OracleArgs,

    /// Who moves first (the opener plays X)
    #[arg(long, value_enum, default_value_t = Starter::Random)]
    pub first: Starter,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.oracle.resolve()?;

    let spinner = create_spinner("Solving the game tree...")?;
    let mut oracle = Oracle::new(&config);
    oracle.initialize()?;
    spinner.finish_and_clear();

    let stdin = io::stdin();
    let mut human = HumanOpponent::new("you", stdin.lock(), io::stdout());
    let mut ai = TableOpponent::new("oracle", config.skill);

    print_section("Tic-Tac-Toe");
    print_kv("AI skill", &config.skill.to_string());
    print_kv("Degraded policy", config.degraded.as_str());
    println!("\nCells are numbered 0-8, left to right, top to bottom.");

    let games = play_session(
        &mut oracle,
        &mut human,
        &mut ai,
        args.first,
        &mut rand::rng(),
        &mut io::stdout(),
    )?;
    println!("\nGames played: {games}");
    Ok(())
}

/// Play games on one oracle until the human declines another or quits.
/// Returns the number of finished games.
fn play_session<R: BufRead, W: Write>(
    oracle: &mut Oracle,
    human: &mut HumanOpponent<R, W>,
    ai: &mut TableOpponent,
    first: Starter,
    rng: &mut impl Rng,
    out: &mut impl Write,
) -> crate::Result<usize> {
    let mut games = 0;
    loop {
        oracle.reset();
        let human_side = first.human_side(&mut *rng);
        writeln!(out, "\nYou play {human_side}.\n")?;

        match play_game(oracle, human_side, human, ai, &mut *out) {
            Ok(()) => {}
            Err(Error::Io { source, .. }) if source.kind() == io::ErrorKind::Interrupted => {
                writeln!(out, "\nGame abandoned.")?;
                return Ok(games);
            }
            Err(e) => return Err(e),
        }
        games += 1;

        let state = oracle.state();
        let highlight = winning_line(state).map(|(_, line)| line);
        writeln!(out, "\n{}\n", render_board(state, highlight))?;
        writeln!(out, "{}", verdict(oracle.outcome(), human_side))?;

        if !human.confirm("Play again?")? {
            return Ok(games);
        }
    }
}

fn play_game<R: BufRead, W: Write>(
    oracle: &mut Oracle,
    human_side: Side,
    human: &mut HumanOpponent<R, W>,
    ai: &mut TableOpponent,
    out: &mut impl Write,
) -> crate::Result<()> {
    while !oracle.context().is_over() {
        if oracle.context().to_move() == human_side {
            human.play(oracle)?;
        } else {
            let cell = ai.play(oracle)?;
            writeln!(out, "AI plays {cell}\n")?;
        }
    }
    Ok(())
}

fn verdict(outcome: Outcome, human_side: Side) -> &'static str {
    match outcome.value().and_then(|value| value.winner()) {
        Some(side) if side == human_side => "You win!",
        Some(_) => "The AI wins.",
        None => "It's a tie.",
    }
}
