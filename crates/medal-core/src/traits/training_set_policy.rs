use crate::models::LabelState;

/// Chooses which labeled indices are fed to the trainer this iteration.
/// Called right after the iteration's points were marked.
pub trait ITrainingSetPolicy: Send {
    fn build(&mut self, labels: &LabelState) -> Vec<usize>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
