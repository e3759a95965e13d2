//! Observer implementations for matches
//!
//! Observers allow composable data collection during a match without
//! coupling the runner to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::matches::GameResult;
use crate::{
    Result,
    ports::Observer,
    tictactoe::{EncodedState, Outcome, Side, format_label},
};

/// Progress bar observer - Shows match progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    ties: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            ties: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} T:{} L:{}", self.wins, self.ties, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_match_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome, agent_side: Side) -> Result<()> {
        match GameResult::for_side(outcome, agent_side) {
            Some(GameResult::Win) => self.wins += 1,
            Some(GameResult::Tie) => self.ties += 1,
            Some(GameResult::Loss) => self.losses += 1,
            None => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_match_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks game lengths per result
pub struct MetricsObserver {
    move_counts: Vec<usize>,
    results: Vec<GameResult>,
}

/// Summary of match metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub avg_game_length: f64,
    pub shortest_game: usize,
    pub longest_game: usize,
    pub avg_win_length: Option<f64>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            move_counts: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Get average game length
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        let win_lengths: Vec<usize> = self
            .move_counts
            .iter()
            .zip(&self.results)
            .filter(|&(_, result)| *result == GameResult::Win)
            .map(|(&moves, _)| moves)
            .collect();
        let avg_win_length = (!win_lengths.is_empty())
            .then(|| win_lengths.iter().sum::<usize>() as f64 / win_lengths.len() as f64);

        MetricsSummary {
            total_games: self.results.len(),
            avg_game_length: self.avg_game_length(),
            shortest_game: self.move_counts.iter().copied().min().unwrap_or(0),
            longest_game: self.move_counts.iter().copied().max().unwrap_or(0),
            avg_win_length,
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize, _agent_side: Side) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _side: Side,
        _cell: usize,
        _state: EncodedState,
    ) -> Result<()> {
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: Outcome, agent_side: Side) -> Result<()> {
        if let Some(result) = GameResult::for_side(outcome, agent_side) {
            self.results.push(result);
        }
        Ok(())
    }
}

/// One finished game as written by [`JsonlObserver`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_num: usize,
    pub agent_side: Side,
    pub moves: Vec<usize>,
    pub final_board: String,
    pub outcome: Outcome,
}

/// JSONL observer - Writes one JSON line per game
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current: Option<GameRecord>,
}

impl JsonlObserver {
    /// Create the output file, truncating an existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| crate::Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            current: None,
        })
    }
}

impl Observer for JsonlObserver {
    fn on_game_start(&mut self, game_num: usize, agent_side: Side) -> Result<()> {
        self.current = Some(GameRecord {
            game_num,
            agent_side,
            moves: Vec::new(),
            final_board: String::new(),
            outcome: Outcome::NonTerminal,
        });
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _side: Side,
        cell: usize,
        state: EncodedState,
    ) -> Result<()> {
        if let Some(record) = &mut self.current {
            record.moves.push(cell);
            record.final_board = format_label(state);
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: Outcome, _agent_side: Side) -> Result<()> {
        if let Some(mut record) = self.current.take() {
            record.outcome = outcome;
            serde_json::to_writer(&mut self.writer, &record)?;
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn on_match_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
