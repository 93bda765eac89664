use anyhow::{ensure, Context, Result};
use common::{Config, ConfigLoader};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubtractionOptions {
    pub pile: u32,
    pub max_take: u32,
}

impl Default for SubtractionOptions {
    fn default() -> Self {
        Self {
            pile: 21,
            max_take: 2,
        }
    }
}

impl Config for SubtractionOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();
        let options = Self {
            pile: load_u32(config, "pile")?.unwrap_or(defaults.pile),
            max_take: load_u32(config, "max_take")?.unwrap_or(defaults.max_take),
        };

        ensure!(options.max_take >= 1, "max_take must be at least 1");

        Ok(options)
    }
}

fn load_u32(config: &ConfigLoader, name: &str) -> Result<Option<u32>> {
    config
        .get(name)
        .and_then(|v| v.as_usize())
        .map(|value| {
            u32::try_from(value).with_context(|| format!("{} = {} is out of range", name, value))
        })
        .transpose()
}
