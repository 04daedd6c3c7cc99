use std::collections::HashSet;

use medal_core::errors::ConfigError;
use medal_core::models::LabelState;
use medal_core::traits::ITrainingSetPolicy;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

/// Retrain on the points labeled this iteration plus a uniformly random
/// `frac` of the points labeled before it.
///
/// The replayed count is `floor(previous * frac)`; when that is 0 only the
/// new points are used.
#[derive(Debug, Clone)]
pub struct OnlineSamplePolicy {
    frac: f64,
    rng: StdRng,
}

impl OnlineSamplePolicy {
    pub fn new(frac: f64, seed: u64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&frac) {
            return Err(ConfigError::ValidationFailed {
                field: "training.online_sample_frac".to_string(),
                message: format!("{frac} is not between 0.0 and 1.0"),
            });
        }
        Ok(Self {
            frac,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn replay_count(&self, previous: usize) -> usize {
        ((previous as f64) * self.frac).floor() as usize
    }
}

impl ITrainingSetPolicy for OnlineSamplePolicy {
    fn build(&mut self, labels: &LabelState) -> Vec<usize> {
        let newly: HashSet<usize> = labels.last_marked().iter().copied().collect();
        let previous: Vec<usize> = labels
            .labeled_indices()
            .into_iter()
            .filter(|i| !newly.contains(i))
            .collect();

        let count = self.replay_count(previous.len());
        let mut indices: Vec<usize> = index::sample(&mut self.rng, previous.len(), count)
            .into_iter()
            .map(|i| previous[i])
            .collect();
        tracing::debug!(
            replayed = indices.len(),
            previous = previous.len(),
            newly = newly.len(),
            "online training set built"
        );
        indices.extend_from_slice(labels.last_marked());
        indices
    }

    fn name(&self) -> &'static str {
        "online_sample"
    }
}
