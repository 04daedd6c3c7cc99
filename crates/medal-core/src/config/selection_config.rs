use serde::{Deserialize, Serialize};

use super::defaults;

/// How many iterations to run and how many points each one labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Number of active learning iterations.
    pub al_iters: u32,
    /// Size of the high-entropy shortlist the diversity step picks from.
    pub num_max_entropy_samples: usize,
    /// Points labeled per iteration.
    pub num_points_to_label_per_al_iter: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            al_iters: defaults::DEFAULT_AL_ITERS,
            num_max_entropy_samples: defaults::DEFAULT_NUM_MAX_ENTROPY_SAMPLES,
            num_points_to_label_per_al_iter: defaults::DEFAULT_POINTS_PER_AL_ITER,
        }
    }
}
