//! Training-set policies, selected by `training.policy`.

pub mod full;
pub mod online_sample;

pub use full::FullPolicy;
pub use online_sample::OnlineSamplePolicy;

use medal_core::config::{TrainingConfig, TrainingSetPolicyKind};
use medal_core::errors::ConfigError;
use medal_core::traits::ITrainingSetPolicy;

/// Build the policy named by `config`. The online policy's sampler is seeded
/// from `seed`.
pub fn build_policy(
    config: &TrainingConfig,
    seed: u64,
) -> Result<Box<dyn ITrainingSetPolicy>, ConfigError> {
    match config.policy {
        TrainingSetPolicyKind::Full => Ok(Box::new(FullPolicy)),
        TrainingSetPolicyKind::OnlineSample => {
            let frac = config
                .online_sample_frac
                .ok_or_else(|| ConfigError::MissingParameter {
                    field: "training.online_sample_frac".to_string(),
                    context: "online_sample training policy".to_string(),
                })?;
            Ok(Box::new(OnlineSamplePolicy::new(frac, seed)?))
        }
    }
}
