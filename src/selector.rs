//! Query-time move selection against a built decision table

use std::fmt;

use rand::{Rng, SeedableRng, prelude::IndexedRandom, random, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    solver::DecisionTable,
    tictactoe::{EncodedState, GameContext, Side},
};

/// Probability that the AI plays the table's optimal move
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Skill(f64);

impl Skill {
    /// Always the optimal move
    pub const PERFECT: Skill = Skill(1.0);

    /// Never consults the optimal move
    pub const NOVICE: Skill = Skill(0.0);

    /// # Errors
    ///
    /// Returns `InvalidSkill` unless `value` is a finite probability.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Skill(value))
        } else {
            Err(Error::InvalidSkill { value })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Skill {
    fn default() -> Self {
        Skill::PERFECT
    }
}

impl TryFrom<f64> for Skill {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Skill::new(value)
    }
}

impl From<Skill> for f64 {
    fn from(skill: Skill) -> f64 {
        skill.0
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// How the AI picks a move when it does not play the optimal one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DegradedPolicy {
    /// Uniformly random among every free cell
    #[default]
    Uniform,
    /// Uniformly random among free cells strictly worse than the optimal
    /// move; uniform over all free cells when every move is equally good
    Suboptimal,
}

impl DegradedPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            DegradedPolicy::Uniform => "uniform",
            DegradedPolicy::Suboptimal => "suboptimal",
        }
    }
}

/// Picks AI moves from the decision table, degrading with probability
/// `1 - skill`
#[derive(Debug, Clone)]
pub struct MoveSelector {
    rng: StdRng,
    degraded: DegradedPolicy,
}

impl MoveSelector {
    pub fn new(degraded: DegradedPolicy) -> Self {
        Self {
            rng: StdRng::seed_from_u64(random()),
            degraded,
        }
    }

    /// Create a selector with a deterministic seed
    pub fn with_seed(degraded: DegradedPolicy, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            degraded,
        }
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn degraded_policy(&self) -> DegradedPolicy {
        self.degraded
    }

    /// Choose a cell for the side to move, apply it to `ctx` and return it.
    ///
    /// # Errors
    ///
    /// Returns `GameOver` on a terminal board and lookup errors for states
    /// outside the table.
    pub fn select_move(
        &mut self,
        table: &DecisionTable,
        ctx: &mut GameContext,
        skill: Skill,
    ) -> Result<usize> {
        if ctx.is_over() {
            return Err(Error::GameOver);
        }
        let state = ctx.state();
        let optimal = table.best_move(state)?;

        let optimal_pick = self.rng.random_bool(skill.value());
        let cell = if optimal_pick {
            optimal
        } else {
            self.degraded_move(table, state, ctx.to_move())?
        };
        debug!(%state, side = ?ctx.to_move(), cell, optimal_pick, "AI move selected");

        ctx.apply(cell)?;
        Ok(cell)
    }

    fn degraded_move(
        &mut self,
        table: &DecisionTable,
        state: EncodedState,
        side: Side,
    ) -> Result<usize> {
        let free: Vec<usize> = state.free_cells().collect();
        let candidates = match self.degraded {
            DegradedPolicy::Uniform => free,
            DegradedPolicy::Suboptimal => {
                let best = table.value(state)?;
                let mut worse = Vec::with_capacity(free.len());
                for &cell in &free {
                    let value = table.value(state.with_cell(side, cell))?;
                    if side.prefers(best, value) {
                        worse.push(cell);
                    }
                }
                if worse.is_empty() { free } else { worse }
            }
        };
        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves { key: state.key() })
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new(DegradedPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_rejects_values_outside_unit_interval() {
        assert!(Skill::new(0.0).is_ok());
        assert!(Skill::new(1.0).is_ok());
        assert!(matches!(Skill::new(1.5), Err(Error::InvalidSkill { .. })));
        assert!(matches!(Skill::new(-0.1), Err(Error::InvalidSkill { .. })));
        assert!(Skill::new(f64::NAN).is_err());
    }

    #[test]
    fn skill_deserializes_with_validation() {
        let skill: Skill = serde_json::from_str("0.25").unwrap();
        assert_eq!(skill.value(), 0.25);
        assert!(serde_json::from_str::<Skill>("2.0").is_err());
    }

    #[test]
    fn perfect_skill_plays_the_table_move() {
        let table = DecisionTable::build().unwrap();
        let mut selector = MoveSelector::with_seed(DegradedPolicy::Uniform, 7);
        let mut ctx = GameContext::new();
        ctx.apply(4).unwrap();
        ctx.apply(0).unwrap();

        let expected = table.best_move(ctx.state()).unwrap();
        let cell = selector.select_move(&table, &mut ctx, Skill::PERFECT).unwrap();
        assert_eq!(cell, expected);
        assert_eq!(ctx.to_move(), Side::Max);
    }

    #[test]
    fn suboptimal_policy_avoids_the_best_value() {
        let table = DecisionTable::build().unwrap();
        // X X .
        // O O .
        // . . .   min to move, only cell 2 wins
        let state = EncodedState::from_cells(&[0, 1], &[3, 4]).unwrap();
        assert_eq!(table.best_move(state).unwrap(), 2);

        for seed in 0..16 {
            let mut selector = MoveSelector::with_seed(DegradedPolicy::Suboptimal, seed);
            let cell = selector.degraded_move(&table, state, Side::Min).unwrap();
            assert_ne!(cell, 2, "seed {seed} picked the winning move");
            let value = table.value(state.with_cell(Side::Min, cell)).unwrap();
            assert!(value > crate::tictactoe::GameValue::MinWins);
        }
    }

    #[test]
    fn novice_skill_still_plays_a_free_cell() {
        let table = DecisionTable::build().unwrap();
        let mut selector = MoveSelector::with_seed(DegradedPolicy::Uniform, 3);
        let mut ctx = GameContext::new();
        while !ctx.is_over() {
            let before = ctx.state();
            let cell = selector.select_move(&table, &mut ctx, Skill::NOVICE).unwrap();
            assert!(before.is_free(cell));
        }
        assert!(matches!(
            selector.select_move(&table, &mut ctx, Skill::NOVICE),
            Err(Error::GameOver)
        ));
    }
}
