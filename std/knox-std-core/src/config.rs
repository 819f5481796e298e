///
/// # Runtime Configuration
///
/// Settings read by the knox runtime when a compiled program starts. There is
/// currently a single section controlling how the random generator is seeded.
///
/// ## Example knox.toml
///
/// ```toml
/// [random]
/// seed = 42
/// ```
///
/// ## Sources
///
/// `RuntimeConfig::from_env` resolves, highest priority first:
/// - `KNOX_SEED` - a decimal u64 seed
/// - `KNOX_CONFIG` - path to a TOML file in the format above
/// - defaults (no seed, the generator draws one from OS entropy)
///

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{KnoxError, Result};

pub const ENV_SEED: &str = "KNOX_SEED";
pub const ENV_CONFIG: &str = "KNOX_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub random: RandomConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RandomConfig {
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RuntimeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded runtime config");
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var(ENV_SEED).ok().as_deref(),
            std::env::var(ENV_CONFIG).ok().as_deref(),
        )
    }

    fn from_vars(seed: Option<&str>, config_path: Option<&str>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) if !path.is_empty() => Self::load(Path::new(path))?,
            _ => Self::default(),
        };
        if let Some(raw) = seed {
            config.random.seed = Some(parse_seed(raw)?);
        }
        Ok(config)
    }
}

fn parse_seed(raw: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|e| KnoxError::Config {
        reason: format!("{ENV_SEED} must be an unsigned integer, got '{raw}': {e}"),
    })
}
