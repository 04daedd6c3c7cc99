use crate::errors::MedalResult;
use crate::models::Checkpoint;

/// Persists run state so a run can resume after a restart.
pub trait ICheckpointStore: Send + Sync {
    fn save(&self, checkpoint: &Checkpoint) -> MedalResult<()>;

    /// Most recent checkpoint for `run_id`, ordered by (al_iter, epoch).
    fn load_latest(&self, run_id: &str) -> MedalResult<Option<Checkpoint>>;
}
