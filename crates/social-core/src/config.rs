//! Configuration System
//!
//! Loads run parameters from a TOML file so runs can be adjusted without
//! recompiling. Every section is optional; missing fields fall back to the
//! defaults below. Command line flags override file values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "social_sim.toml";

/// Which flavour of the model to run.
///
/// `Extended` adds user groups, tweet polarity and contributor attribution.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Base,
    #[default]
    Extended,
}

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub model: ModelConfig,
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

/// Model construction parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Number of user agents; user `i` is bound to matrix node `i`
    pub num_users: usize,
    /// Number of contributor agents (extended variant only)
    pub num_contributors: usize,
    /// Per-step probability that a user authors a tweet
    pub tweet_probability: f64,
    /// Path to the whitespace-separated adjacency matrix
    pub adjacency_matrix: PathBuf,
    pub variant: Variant,
    /// Create one initial tweet per user at construction time
    pub seed_tweets: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            num_users: 130,
            num_contributors: 10,
            tweet_probability: 0.1,
            adjacency_matrix: PathBuf::from("adjacency.txt"),
            variant: Variant::Extended,
            seed_tweets: true,
        }
    }
}

impl ModelConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_users == 0 {
            return Err(ConfigError::Invalid {
                field: "num_users",
                reason: "must be a positive integer".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.tweet_probability) {
            return Err(ConfigError::Invalid {
                field: "tweet_probability",
                reason: format!("{} is outside [0, 1]", self.tweet_probability),
            });
        }
        Ok(())
    }

    /// Contributors actually spawned for this variant.
    pub fn effective_contributors(&self) -> usize {
        match self.variant {
            Variant::Base => 0,
            Variant::Extended => self.num_contributors,
        }
    }
}

/// Driver loop parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub steps: u64,
    pub seed: u64,
    /// Print the per-user report every N steps (0 disables it)
    pub report_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 10,
            seed: 42,
            report_interval: 1,
        }
    }
}

/// Output files written at the end of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub write_metrics: bool,
    pub write_graph: bool,
    pub write_final_state: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            write_metrics: true,
            write_graph: true,
            write_final_state: true,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from `path`, or use defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path.as_ref()).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", path.as_ref().display(), e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.model.validate()
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.model.num_users, 130);
        assert_eq!(config.model.num_contributors, 10);
        assert_eq!(config.simulation.steps, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SimConfig::from_toml(
            r#"
            [model]
            num_users = 4
            tweet_probability = 0.5
            variant = "base"
            adjacency_matrix = "data/four.txt"

            [simulation]
            steps = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.model.num_users, 4);
        assert_eq!(config.model.variant, Variant::Base);
        assert_eq!(config.model.adjacency_matrix, PathBuf::from("data/four.txt"));
        assert!(config.model.seed_tweets);
        assert_eq!(config.simulation.steps, 3);
        assert_eq!(config.simulation.seed, 42);
        assert!(config.output.write_metrics);
    }

    #[test]
    fn test_validation_rejects_bad_parameters() {
        let mut model = ModelConfig::default();
        model.tweet_probability = 1.5;
        assert!(matches!(
            model.validate(),
            Err(ConfigError::Invalid { field: "tweet_probability", .. })
        ));

        model.tweet_probability = f64::NAN;
        assert!(model.validate().is_err());

        let model = ModelConfig {
            num_users: 0,
            ..ModelConfig::default()
        };
        assert!(matches!(
            model.validate(),
            Err(ConfigError::Invalid { field: "num_users", .. })
        ));
    }

    #[test]
    fn test_base_variant_ignores_contributors() {
        let model = ModelConfig {
            variant: Variant::Base,
            num_contributors: 7,
            ..ModelConfig::default()
        };
        assert_eq!(model.effective_contributors(), 0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = SimConfig::load("definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));

        let config = SimConfig::load_or_default("definitely/not/here.toml");
        assert_eq!(config.model.num_users, 130);
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = SimConfig::from_toml("[model\nnum_users = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
