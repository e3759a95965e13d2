//! Evaluate command - Play the oracle against a baseline opponent

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::{
    DegradedPolicy, Oracle, Skill,
    adapters::{DefensiveOpponent, RandomOpponent, TableOpponent},
    cli::{
        config::OracleArgs,
        output::{create_spinner, format_rate, print_kv, print_section, print_subsection},
    },
    pipeline::{
        FirstMover, JsonlObserver, MatchConfig, MatchRunner, MatchSummary, MetricsObserver,
        MetricsSummary, ProgressObserver,
    },
    ports::Opponent,
};

/// Baseline the oracle plays against
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    Random,
    Defensive,
    Perfect,
}

#[derive(Parser, Debug)]
#[command(about = "Evaluate the oracle against a baseline opponent")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub oracle: OracleArgs,

    /// Opponent to evaluate against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Random)]
    pub opponent: OpponentKind,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Who opens each game
    #[arg(long, value_enum, default_value_t = FirstMover::Alternate)]
    pub first_mover: FirstMover,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Write every game as one JSON line
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Export results to file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Serialize)]
struct EvaluationExport<'a> {
    skill: Skill,
    degraded: DegradedPolicy,
    seed: Option<u64>,
    first_mover: FirstMover,
    summary: &'a MatchSummary,
    metrics: MetricsSummary,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let config = args.oracle.resolve()?;

    let spinner = create_spinner("Solving the game tree...")?;
    let mut oracle = Oracle::new(&config);
    oracle.initialize()?;
    spinner.finish_and_clear();

    let mut agent = TableOpponent::new("oracle", config.skill);
    let mut opponent: Box<dyn Opponent> = match args.opponent {
        OpponentKind::Random => Box::new(RandomOpponent::new("random")),
        OpponentKind::Defensive => Box::new(DefensiveOpponent::new("defensive")),
        OpponentKind::Perfect => Box::new(TableOpponent::perfect()),
    };

    print_section("Evaluation");
    print_kv("Skill", &config.skill.to_string());
    print_kv("Degraded policy", config.degraded.as_str());
    print_kv("Opponent", opponent.name());
    print_kv("Games", &args.games.to_string());
    print_kv("First mover", &format!("{:?}", args.first_mover));
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let mut metrics = MetricsObserver::new();
    let match_config = MatchConfig {
        games: args.games,
        first_mover: args.first_mover,
        seed: config.seed,
    };
    let mut runner = MatchRunner::new(match_config).with_observer(Box::new(&mut metrics));
    if !args.no_progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.log {
        runner = runner.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let summary = runner.run(&mut oracle, &mut agent, opponent.as_mut())?;
    drop(runner);
    let metrics = metrics.summary();

    print_subsection("Results");
    print_kv("Wins", &format_rate(summary.wins, summary.win_rate));
    print_kv("Ties", &format_rate(summary.ties, summary.tie_rate));
    print_kv("Losses", &format_rate(summary.losses, summary.loss_rate));
    print_kv("Avg game length", &format!("{:.2}", metrics.avg_game_length));
    if let Some(avg) = metrics.avg_win_length {
        print_kv("Avg win length", &format!("{avg:.2}"));
    }

    if let Some(path) = &args.export {
        let export = EvaluationExport {
            skill: config.skill,
            degraded: config.degraded,
            seed: config.seed,
            first_mover: args.first_mover,
            summary: &summary,
            metrics,
        };
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &export)?;
        println!("\n✓ Results exported to: {}", path.display());
    }

    Ok(())
}
