//! Configuration for the oracle and the command-line surface.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    selector::{DegradedPolicy, Skill},
};

/// Configuration for creating an [`Oracle`](crate::Oracle).
///
/// # Examples
///
/// ```
/// use ttt_oracle::{DegradedPolicy, OracleConfig, Skill};
///
/// let config = OracleConfig::new()
///     .with_seed(42)
///     .with_skill(Skill::new(0.8).unwrap())
///     .with_degraded_policy(DegradedPolicy::Suboptimal);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Probability of playing the optimal move
    pub skill: Skill,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Move policy when the optimal move is skipped
    pub degraded: DegradedPolicy,
}

impl OracleConfig {
    /// Perfect play, non-deterministic seed, uniform degraded policy
    pub fn new() -> Self {
        Self {
            skill: Skill::PERFECT,
            seed: None,
            degraded: DegradedPolicy::default(),
        }
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skill = skill;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_degraded_policy(mut self, degraded: DegradedPolicy) -> Self {
        self.degraded = degraded;
        self
    }

    /// Load a JSON configuration file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| Error::InvalidConfiguration {
            message: format!("{}: {e}", path.display()),
        })
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self::new()
    }
}
