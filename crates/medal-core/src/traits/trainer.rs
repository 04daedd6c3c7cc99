use crate::errors::MedalResult;
use crate::models::{EpochMetrics, ParameterBlob};
use crate::traits::{IBatchSource, IClassifier};

/// Fits the classifier. Loss, optimizer and shuffling are its own business.
pub trait ITrainer: Send {
    /// Train one epoch on the items at `indices`.
    fn train_epoch(
        &mut self,
        classifier: &mut dyn IClassifier,
        source: &dyn IBatchSource,
        indices: &[usize],
        epoch: u32,
    ) -> MedalResult<EpochMetrics>;

    /// Optimizer state to persist with checkpoints, if any.
    fn optimizer_state(&self) -> MedalResult<Option<ParameterBlob>> {
        Ok(None)
    }

    /// Restore optimizer state from a checkpoint.
    fn restore_optimizer_state(&mut self, _blob: &ParameterBlob) -> MedalResult<()> {
        Ok(())
    }
}
