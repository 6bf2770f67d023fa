use std::num::ParseIntError;

use thiserror::Error;
use tracing::warn;

use crate::ScreenSize;
use crate::noise::NOISE_ODDS;
use crate::pattern::Pattern;
use crate::rule_set::RuleSet;
use crate::rule_set::RuleSetError;
use crate::rule_set::SEEDS;
use crate::rule_set::STANDARD;

pub const SEED_VAR: &str = "TORUS_LIFE_SEED";
pub const NOISE_VAR: &str = "TORUS_LIFE_NOISE";
pub const PATTERN_VAR: &str = "TORUS_LIFE_PATTERN";
pub const RULE_VAR: &str = "TORUS_LIFE_RULE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TORUS_LIFE_SEED must be an unsigned integer, got {value:?}")]
    InvalidSeed {
        value: String,
        source: ParseIntError,
    },

    #[error("TORUS_LIFE_NOISE must be an unsigned integer or \"off\", got {value:?}")]
    InvalidNoise {
        value: String,
        source: ParseIntError,
    },

    #[error("TORUS_LIFE_RULE contains an invalid rule {value:?}: {source}")]
    InvalidRule { value: String, source: RuleSetError },

    #[error("TORUS_LIFE_RULE names no rules")]
    NoRules,

    #[error("Unknown pattern {0:?}")]
    UnknownPattern(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Multiplier applied to elapsed seconds before they fill the step accumulator
    pub speed: f32,

    /// Accumulator value at which a generation is due
    pub step_interval: f32,
    pub interval_delta: f32,
    pub max_interval: f32,

    /// One in `noise_odds` cells is forced alive each generation. `None` disables noise.
    pub noise_odds: Option<u32>,

    /// Seed for the noise. Drawn from entropy when unset.
    pub seed: Option<u64>,

    /// Rules cycled through at run time, the first one is active at start
    pub rules: Vec<RuleSet>,

    pub pattern: String,

    /// Terminal rows below the grid reserved for help and statistics
    pub status_lines: ScreenSize,

    pub start_paused: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: 7.0,
            step_interval: 0.5,
            interval_delta: 0.1,
            max_interval: 10.0,
            noise_odds: Some(NOISE_ODDS),
            seed: None,
            rules: vec![STANDARD, SEEDS],
            pattern: String::from("growth"),
            status_lines: 3,
            start_paused: true,
        }
    }
}

impl Config {
    /// Defaults, overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let var = |key: &str| {
            let value = lookup(key)?;
            let value = value.trim();

            if value.is_empty() {
                warn!(key, "ignoring empty override");
                return None;
            }

            Some(value.to_string())
        };

        if let Some(value) = var(SEED_VAR) {
            let seed = value
                .parse()
                .map_err(|source| ConfigError::InvalidSeed { value, source })?;

            config.seed = Some(seed);
        }

        if let Some(value) = var(NOISE_VAR) {
            config.noise_odds = match value.parse::<u32>() {
                Ok(0) => None,
                Ok(odds) => Some(odds),
                Err(_) if value.eq_ignore_ascii_case("off") => None,
                Err(source) => return Err(ConfigError::InvalidNoise { value, source }),
            };
        }

        if let Some(value) = var(PATTERN_VAR) {
            if Pattern::named(&value).is_none() {
                return Err(ConfigError::UnknownPattern(value));
            }

            config.pattern = value;
        }

        if let Some(value) = var(RULE_VAR) {
            config.rules = parse_rules(&value)?;
        }

        Ok(config)
    }
}

/// Parses a comma separated list of rulestrings.
fn parse_rules(value: &str) -> Result<Vec<RuleSet>, ConfigError> {
    let rules = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<RuleSet>().map_err(|source| ConfigError::InvalidRule {
                value: s.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if rules.is_empty() {
        return Err(ConfigError::NoRules);
    }

    Ok(rules)
}
