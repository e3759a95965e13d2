//! Computer-controlled opponents

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Oracle, Result,
    ports::Opponent,
    selector::Skill,
    tictactoe::{EncodedState, winning_moves},
};

/// Plays from the decision table at a fixed skill
pub struct TableOpponent {
    name: String,
    skill: Skill,
}

impl TableOpponent {
    pub fn new(name: impl Into<String>, skill: Skill) -> Self {
        Self {
            name: name.into(),
            skill,
        }
    }

    /// Always plays the optimal move
    pub fn perfect() -> Self {
        Self::new("perfect", Skill::PERFECT)
    }

    pub fn skill(&self) -> Skill {
        self.skill
    }
}

impl Opponent for TableOpponent {
    fn play(&mut self, oracle: &mut Oracle) -> Result<usize> {
        oracle.request_ai_move(self.skill)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn random_free_cell(state: EncodedState, rng: &mut StdRng) -> Result<usize> {
    let moves: Vec<usize> = state.free_cells().collect();
    if moves.is_empty() {
        return Err(Error::NoValidMoves { key: state.key() });
    }
    let index = rng.random_range(0..moves.len());
    Ok(moves[index])
}

/// Random policy opponent (baseline)
pub struct RandomOpponent {
    name: String,
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a random opponent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Opponent for RandomOpponent {
    fn play(&mut self, oracle: &mut Oracle) -> Result<usize> {
        if oracle.context().is_over() {
            return Err(Error::GameOver);
        }
        let cell = random_free_cell(oracle.state(), &mut self.rng)?;
        oracle.notify_external_move(cell)?;
        Ok(cell)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Defensive opponent (takes a win, blocks the other side's win, otherwise
/// plays randomly)
pub struct DefensiveOpponent {
    name: String,
    rng: StdRng,
}

impl DefensiveOpponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a defensive opponent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Opponent for DefensiveOpponent {
    fn play(&mut self, oracle: &mut Oracle) -> Result<usize> {
        let ctx = oracle.context();
        if ctx.is_over() {
            return Err(Error::GameOver);
        }
        let state = ctx.state();
        let side = ctx.to_move();

        let cell = match winning_moves(state, side).first() {
            Some(&win) => win,
            None => match winning_moves(state, side.opponent()).first() {
                Some(&block) => block,
                None => random_free_cell(state, &mut self.rng)?,
            },
        };
        oracle.notify_external_move(cell)?;
        Ok(cell)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OracleConfig, tictactoe::Outcome};

    fn ready_oracle() -> Oracle {
        let mut oracle = Oracle::new(&OracleConfig::new().with_seed(11));
        oracle.initialize().unwrap();
        oracle
    }

    #[test]
    fn random_opponent_plays_free_cells_until_the_end() {
        let mut oracle = ready_oracle();
        let mut opponent = RandomOpponent::with_seed("random", 5);
        while !oracle.context().is_over() {
            let before = oracle.state();
            let cell = opponent.play(&mut oracle).unwrap();
            assert!(before.is_free(cell));
        }
        assert!(matches!(opponent.play(&mut oracle), Err(Error::GameOver)));
    }

    #[test]
    fn defensive_opponent_blocks() {
        let mut oracle = ready_oracle();
        // X X .
        // . O .
        // . . .   O to move must block at 2
        for cell in [0, 4, 1] {
            oracle.notify_external_move(cell).unwrap();
        }
        let mut opponent = DefensiveOpponent::with_seed("defensive", 1);
        assert_eq!(opponent.play(&mut oracle).unwrap(), 2);
        assert_eq!(oracle.outcome(), Outcome::NonTerminal);
    }
}
