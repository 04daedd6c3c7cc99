use medal_core::models::LabelState;
use medal_core::traits::ITrainingSetPolicy;

/// Retrain on every labeled point.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullPolicy;

impl ITrainingSetPolicy for FullPolicy {
    fn build(&mut self, labels: &LabelState) -> Vec<usize> {
        labels.labeled_indices()
    }

    fn name(&self) -> &'static str {
        "full"
    }
}
