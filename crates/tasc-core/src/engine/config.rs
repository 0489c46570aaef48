use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

const DEFAULT_ENGINE_CONFIG_YAML: &str = include_str!("../../config/engine.default.yaml");

/// How the robot infers the human's goal from the last observed move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceStrategy {
    /// Per-goal change in state value caused by the human's move.
    #[default]
    ValueDelta,
    /// Per-goal legibility of the human's move under the distance function.
    Geometric,
}

/// Fixed weights combining the three scoring criteria.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub value: f64,
    pub effort: f64,
    pub legibility: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            value: 0.9,
            effort: 0.05,
            legibility: 0.05,
        }
    }
}

/// Two-level perceived effort model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffortLevels {
    /// Probability assigned when the action leaves the state unchanged.
    pub still: f64,
    /// Probability assigned when the action visibly changes the state.
    pub moving: f64,
}

impl Default for EffortLevels {
    fn default() -> Self {
        EffortLevels {
            still: 0.1,
            moving: 0.9,
        }
    }
}

/// Configuration of the decision engine and the interaction loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: Weights,
    pub effort: EffortLevels,
    pub inference: InferenceStrategy,
    /// Goal reported before any human action has been observed.
    pub default_goal: usize,
    /// Seed of the tie-break random source.
    pub seed: u64,
    /// Upper bound on ticks in `Teammate::run`.
    pub max_ticks: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            weights: Weights::default(),
            effort: EffortLevels::default(),
            inference: InferenceStrategy::ValueDelta,
            default_goal: 0,
            seed: 1,
            max_ticks: 1000,
        }
    }
}

impl EngineConfig {
    /// Parse an engine config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_yaml::from_str(yaml).map_err(ConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an engine config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_ENGINE_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, ConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("value", self.weights.value),
            ("effort", self.weights.effort),
            ("legibility", self.weights.legibility),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} weight must be finite and >= 0"
                )));
            }
        }

        let levels = [("still", self.effort.still), ("moving", self.effort.moving)];
        for (name, level) in levels {
            if !(0.0..=1.0).contains(&level) {
                return Err(ConfigError::Invalid(format!(
                    "{name} effort level must be within [0, 1]"
                )));
            }
        }

        if self.max_ticks == 0 {
            return Err(ConfigError::Invalid(
                "max_ticks must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error type for loading and validating `EngineConfig`.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            ConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            ConfigError::Invalid(err) => write!(f, "invalid engine config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}
