//! Match runner: complete games between two opponents through one oracle

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Oracle, Result,
    ports::{Observer, Opponent},
    tictactoe::{Outcome, Side},
};

/// Which participant opens each game (the opener plays the min side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FirstMover {
    Agent,
    Opponent,
    /// Agent opens even-numbered games, opponent odd-numbered ones
    #[default]
    Alternate,
}

impl FirstMover {
    /// Side the agent plays in game `game_num`
    pub fn agent_side(self, game_num: usize) -> Side {
        match self {
            FirstMover::Agent => Side::Min,
            FirstMover::Opponent => Side::Max,
            FirstMover::Alternate if game_num % 2 == 0 => Side::Min,
            FirstMover::Alternate => Side::Max,
        }
    }
}

/// Result of a finished game from one participant's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Tie,
    Loss,
}

impl GameResult {
    /// Result for `side`, or `None` while the game is still running
    pub fn for_side(outcome: Outcome, side: Side) -> Option<GameResult> {
        let winner = match outcome {
            Outcome::NonTerminal => return None,
            Outcome::Tie => return Some(GameResult::Tie),
            Outcome::MinWins => Side::Min,
            Outcome::MaxWins => Side::Max,
        };
        Some(if winner == side {
            GameResult::Win
        } else {
            GameResult::Loss
        })
    }
}

/// Match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of games
    pub games: usize,

    /// Who opens each game
    pub first_mover: FirstMover,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 100,
            first_mover: FirstMover::Alternate,
            seed: None,
        }
    }
}

/// Aggregated results of a match, from the agent's point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub agent: String,
    pub opponent: String,
    pub games: usize,
    pub wins: usize,
    pub ties: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub tie_rate: f64,
    pub loss_rate: f64,
}

impl MatchSummary {
    pub fn new(agent: &str, opponent: &str, wins: usize, ties: usize, losses: usize) -> Self {
        let games = wins + ties + losses;
        let rate = |count: usize| {
            if games > 0 {
                count as f64 / games as f64
            } else {
                0.0
            }
        };
        Self {
            agent: agent.to_string(),
            opponent: opponent.to_string(),
            games,
            wins,
            ties,
            losses,
            win_rate: rate(wins),
            tie_rate: rate(ties),
            loss_rate: rate(losses),
        }
    }
}

/// Plays a series of games and reports to its observers
pub struct MatchRunner<'a> {
    config: MatchConfig,
    observers: Vec<Box<dyn Observer + 'a>>,
}

impl<'a> MatchRunner<'a> {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer. Pass `Box::new(&mut observer)` to read it back after
    /// the match.
    pub fn with_observer(mut self, observer: Box<dyn Observer + 'a>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play every game of the match.
    ///
    /// The oracle must be initialized; its tracked game is reset before each
    /// game.
    ///
    /// # Errors
    ///
    /// Propagates oracle and observer errors, and fails with
    /// `InvalidConfiguration` if an opponent returns without moving.
    pub fn run(
        &mut self,
        oracle: &mut Oracle,
        agent: &mut dyn Opponent,
        opponent: &mut dyn Opponent,
    ) -> Result<MatchSummary> {
        oracle.table()?;
        if let Some(seed) = self.config.seed {
            oracle.reseed(seed);
            agent.set_rng_seed(seed.wrapping_add(1));
            opponent.set_rng_seed(seed.wrapping_add(2));
        }

        for observer in &mut self.observers {
            observer.on_match_start(self.config.games)?;
        }

        let (mut wins, mut ties, mut losses) = (0, 0, 0);
        for game_num in 0..self.config.games {
            let agent_side = self.config.first_mover.agent_side(game_num);
            match self.play_game(game_num, agent_side, oracle, agent, opponent)? {
                GameResult::Win => wins += 1,
                GameResult::Tie => ties += 1,
                GameResult::Loss => losses += 1,
            }
        }

        for observer in &mut self.observers {
            observer.on_match_end()?;
        }

        Ok(MatchSummary::new(
            agent.name(),
            opponent.name(),
            wins,
            ties,
            losses,
        ))
    }

    fn play_game(
        &mut self,
        game_num: usize,
        agent_side: Side,
        oracle: &mut Oracle,
        agent: &mut dyn Opponent,
        opponent: &mut dyn Opponent,
    ) -> Result<GameResult> {
        oracle.reset();
        for observer in &mut self.observers {
            observer.on_game_start(game_num, agent_side)?;
        }

        while !oracle.context().is_over() {
            let side = oracle.context().to_move();
            let ply = oracle.context().ply();
            let mover: &mut dyn Opponent = if side == agent_side {
                &mut *agent
            } else {
                &mut *opponent
            };
            let cell = mover.play(oracle)?;
            if oracle.context().ply() != ply + 1 {
                return Err(Error::InvalidConfiguration {
                    message: format!("opponent '{}' returned without moving", mover.name()),
                });
            }

            for observer in &mut self.observers {
                observer.on_move(game_num, side, cell, oracle.state())?;
            }
        }

        let outcome = oracle.outcome();
        debug!(game_num, ?agent_side, ?outcome, "game finished");
        for observer in &mut self.observers {
            observer.on_game_end(game_num, outcome, agent_side)?;
        }
        GameResult::for_side(outcome, agent_side).ok_or_else(|| Error::InvalidConfiguration {
            message: format!("game {game_num} stopped before a terminal state"),
        })
    }
}
