use anyhow::{ensure, Result};
use common::{Config, ConfigLoader};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SolverOptions {
    pub ranks: usize,
    /// Jobs between progress lines on each rank. Zero turns progress logging off.
    pub stats_interval: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            ranks: 4,
            stats_interval: 100_000,
        }
    }
}

impl SolverOptions {
    pub fn with_ranks(ranks: usize) -> Self {
        Self {
            ranks,
            ..Self::default()
        }
    }
}

impl Config for SolverOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();
        let options = Self {
            ranks: config
                .get("ranks")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.ranks),
            stats_interval: config
                .get("stats_interval")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.stats_interval),
        };

        ensure!(options.ranks >= 1, "ranks must be at least 1");

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_scope() {
        let config = ConfigLoader::load_str(
            "solver { ranks = 8, stats_interval = 50 }",
            "solver".to_string(),
        )
        .unwrap();

        let options: SolverOptions = config.load().unwrap();

        assert_eq!(
            options,
            SolverOptions {
                ranks: 8,
                stats_interval: 50
            }
        );
    }

    #[test]
    fn test_load_rejects_zero_ranks() {
        let config =
            ConfigLoader::load_str("solver { ranks = 0 }", "solver".to_string()).unwrap();

        assert!(config.load::<SolverOptions>().is_err());
    }
}
