use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core::constants::{DERIVED_COLOR_BRIGHTNESS, MIN_OBSERVER_DISTANCE, WORLD_BOUND};

/// How a new bearing sample treats the one already stored for its key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplePolicy {
    /// Every bearing replaces the stored baseline
    #[default]
    Overwrite,
    /// A bearing is stored only when the key has no baseline yet
    KeepFirst,
}

/// Tunable parameters of the tracking engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum absolute coordinate a bearing fix may have (blocks)
    pub world_bound: f64,
    /// Fixes at or closer than this to the observer are rejected (blocks)
    pub min_observer_distance: f64,
    /// HSV value of colours derived from entity keys (0.0 to 1.0)
    pub derived_brightness: f32,
    /// Added to direct positions; 0.5 targets block centres (0.0 to 1.0)
    pub cell_offset: f64,
    /// Bearing lines whose slopes differ by no more than this are parallel
    pub parallel_epsilon: f64,
    /// Baseline replacement policy for bearing samples
    pub sample_policy: SamplePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            world_bound: WORLD_BOUND,
            min_observer_distance: MIN_OBSERVER_DISTANCE,
            derived_brightness: DERIVED_COLOR_BRIGHTNESS,
            cell_offset: 0.0,
            parallel_epsilon: 0.0,
            sample_policy: SamplePolicy::Overwrite,
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid parameter value
    #[error("invalid {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
        reason: &'static str,
    },
    /// Configuration file I/O error
    #[error("config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON serialization/deserialization error
    #[error("config serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineConfig {
    /// Squared form of `min_observer_distance`, compared against squared distances
    pub fn min_observer_distance_sqr(&self) -> f64 {
        self.min_observer_distance * self.min_observer_distance
    }

    /// Check every parameter against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_bound.is_finite() && self.world_bound > 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "world_bound",
                value: self.world_bound.to_string(),
                reason: "must be a positive finite distance",
            });
        }

        if !(self.min_observer_distance.is_finite() && self.min_observer_distance >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "min_observer_distance",
                value: self.min_observer_distance.to_string(),
                reason: "must be a non-negative finite distance",
            });
        }

        if !(0.0..=1.0).contains(&self.derived_brightness) {
            return Err(ConfigError::InvalidParameter {
                parameter: "derived_brightness",
                value: self.derived_brightness.to_string(),
                reason: "must be between 0.0 and 1.0",
            });
        }

        if !(0.0..1.0).contains(&self.cell_offset) {
            return Err(ConfigError::InvalidParameter {
                parameter: "cell_offset",
                value: self.cell_offset.to_string(),
                reason: "must be in [0.0, 1.0)",
            });
        }

        if !(self.parallel_epsilon.is_finite() && self.parallel_epsilon >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "parallel_epsilon",
                value: self.parallel_epsilon.to_string(),
                reason: "must be a non-negative finite value",
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.as_ref().to_string_lossy().to_string(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self)?;

        fs::write(&path, content).map_err(|source| ConfigError::Io {
            path: path.as_ref().to_string_lossy().to_string(),
            source,
        })
    }
}
