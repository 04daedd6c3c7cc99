use serde::{Deserialize, Serialize};

use super::defaults;

/// Which labeled points are replayed when retraining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingSetPolicyKind {
    /// Every labeled point.
    #[default]
    Full,
    /// Newly labeled points plus a random fraction of older ones.
    OnlineSample,
}

/// Retraining settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Epochs per active learning iteration.
    pub epochs: u32,
    /// Restore the initial weights before each iteration's fit.
    pub reset_model_weights_each_al_iter: bool,
    pub policy: TrainingSetPolicyKind,
    /// Fraction of previously labeled points replayed by the online policy.
    /// Required when `policy = "online_sample"`.
    pub online_sample_frac: Option<f64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: defaults::DEFAULT_EPOCHS,
            reset_model_weights_each_al_iter: defaults::DEFAULT_RESET_MODEL_WEIGHTS,
            policy: TrainingSetPolicyKind::Full,
            online_sample_frac: None,
        }
    }
}
