//! Top-level MedAL configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    defaults, CheckpointConfig, ModelPreset, ObservabilityConfig, SelectionConfig,
    TrainingConfig, TrainingSetPolicyKind,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (`ConfigOverrides`)
/// 2. Environment variables (`MEDAL_*`)
/// 3. Config file (TOML)
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedalConfig {
    /// Identifies the run; checkpoints are keyed by it.
    pub run_id: String,
    /// Seed for the initial random pick and the online policy's sampling.
    pub seed: u64,
    pub selection: SelectionConfig,
    pub training: TrainingConfig,
    pub checkpoint: CheckpointConfig,
    pub observability: ObservabilityConfig,
}

impl Default for MedalConfig {
    fn default() -> Self {
        Self {
            run_id: defaults::DEFAULT_RUN_ID.to_string(),
            seed: defaults::DEFAULT_SEED,
            selection: SelectionConfig::default(),
            training: TrainingConfig::default(),
            checkpoint: CheckpointConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Overrides applied on top of every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub run_id: Option<String>,
    pub seed: Option<u64>,
    pub al_iters: Option<u32>,
    pub epochs: Option<u32>,
    pub online_sample_frac: Option<f64>,
    pub checkpoint_dir: Option<String>,
}

impl MedalConfig {
    /// Defaults with a preset's hyperparameters applied.
    pub fn for_preset(preset: ModelPreset, run_id: impl Into<String>) -> Self {
        let mut config = Self {
            run_id: run_id.into(),
            ..Self::default()
        };
        preset.apply(&mut config);
        config
    }

    /// Load configuration with layered resolution and validate the result.
    ///
    /// A `path` that is given but missing is an error; pass `None` to run
    /// from defaults and environment only.
    pub fn load(
        path: Option<&Path>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run_id.trim().is_empty() {
            return Err(invalid("run_id", "must not be empty"));
        }
        if self.selection.al_iters == 0 {
            return Err(invalid("selection.al_iters", "must be greater than 0"));
        }
        let per_iter = self.selection.num_points_to_label_per_al_iter;
        if per_iter == 0 {
            return Err(invalid(
                "selection.num_points_to_label_per_al_iter",
                "must be greater than 0",
            ));
        }
        if self.selection.num_max_entropy_samples == 0 {
            return Err(invalid(
                "selection.num_max_entropy_samples",
                "must be greater than 0",
            ));
        }
        if self.training.epochs == 0 {
            return Err(invalid("training.epochs", "must be greater than 0"));
        }
        if self.training.policy == TrainingSetPolicyKind::OnlineSample {
            match self.training.online_sample_frac {
                None => {
                    return Err(ConfigError::MissingParameter {
                        field: "training.online_sample_frac".to_string(),
                        context: "online_sample training policy".to_string(),
                    })
                }
                Some(frac) if !(0.0..=1.0).contains(&frac) => {
                    return Err(invalid(
                        "training.online_sample_frac",
                        "must be between 0.0 and 1.0",
                    ))
                }
                Some(_) => {}
            }
        }
        if self.checkpoint.enabled() && self.checkpoint.dir.trim().is_empty() {
            return Err(invalid("checkpoint.dir", "must not be empty"));
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `MEDAL_AL_ITERS`, `MEDAL_EPOCHS`, etc. Unparseable values are ignored.
    fn apply_env_overrides(config: &mut MedalConfig) {
        if let Ok(val) = std::env::var("MEDAL_RUN_ID") {
            config.run_id = val;
        }
        if let Some(v) = env_parse::<u64>("MEDAL_SEED") {
            config.seed = v;
        }
        if let Some(v) = env_parse::<u32>("MEDAL_AL_ITERS") {
            config.selection.al_iters = v;
        }
        if let Some(v) = env_parse::<usize>("MEDAL_NUM_MAX_ENTROPY_SAMPLES") {
            config.selection.num_max_entropy_samples = v;
        }
        if let Some(v) = env_parse::<usize>("MEDAL_POINTS_PER_AL_ITER") {
            config.selection.num_points_to_label_per_al_iter = v;
        }
        if let Some(v) = env_parse::<u32>("MEDAL_EPOCHS") {
            config.training.epochs = v;
        }
        if let Some(v) = env_parse::<f64>("MEDAL_ONLINE_SAMPLE_FRAC") {
            config.training.online_sample_frac = Some(v);
        }
        if let Ok(val) = std::env::var("MEDAL_CHECKPOINT_DIR") {
            config.checkpoint.dir = val;
        }
        if let Some(v) = env_parse::<u32>("MEDAL_CHECKPOINT_INTERVAL") {
            config.checkpoint.interval = v;
        }
    }

    fn apply_overrides(config: &mut MedalConfig, overrides: &ConfigOverrides) {
        if let Some(ref v) = overrides.run_id {
            config.run_id = v.clone();
        }
        if let Some(v) = overrides.seed {
            config.seed = v;
        }
        if let Some(v) = overrides.al_iters {
            config.selection.al_iters = v;
        }
        if let Some(v) = overrides.epochs {
            config.training.epochs = v;
        }
        if let Some(v) = overrides.online_sample_frac {
            config.training.online_sample_frac = Some(v);
        }
        if let Some(ref v) = overrides.checkpoint_dir {
            config.checkpoint.dir = v.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}
