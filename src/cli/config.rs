//! Shared configuration arguments for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{DegradedPolicy, OracleConfig, Skill};

/// Oracle options shared across commands. Flags override values read from
/// `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct OracleArgs {
    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Probability of playing the optimal move (0.0 - 1.0)
    #[arg(long, short = 's')]
    pub skill: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Move policy when the optimal move is skipped
    #[arg(long, value_enum)]
    pub degraded: Option<DegradedPolicy>,
}

impl OracleArgs {
    /// Merge the configuration file (if any) with the command-line flags
    pub fn resolve(&self) -> Result<OracleConfig> {
        let mut config = match &self.config {
            Some(path) => OracleConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => OracleConfig::default(),
        };

        if let Some(skill) = self.skill {
            config.skill = Skill::new(skill).context("Invalid --skill")?;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(degraded) = self.degraded {
            config.degraded = degraded;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"skill": 0.25, "seed": 7}}"#).unwrap();

        let args = OracleArgs {
            config: Some(file.path().to_path_buf()),
            skill: None,
            seed: Some(9),
            degraded: Some(DegradedPolicy::Suboptimal),
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.skill.value(), 0.25);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.degraded, DegradedPolicy::Suboptimal);
    }

    #[test]
    fn rejects_out_of_range_skill() {
        let args = OracleArgs {
            skill: Some(1.5),
            ..OracleArgs::default()
        };
        assert!(args.resolve().is_err());
    }
}
