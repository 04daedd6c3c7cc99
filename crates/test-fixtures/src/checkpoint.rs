use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use medal_core::errors::MedalResult;
use medal_core::models::Checkpoint;
use medal_core::traits::ICheckpointStore;

/// Keeps every saved checkpoint in memory. Clones share the same storage,
/// so a test can hand one clone to the loop and inspect another.
#[derive(Debug, Clone, Default)]
pub struct MemoryCheckpointStore {
    saved: Arc<Mutex<Vec<Checkpoint>>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, e.g. to simulate a previous run.
    pub fn with_checkpoint(checkpoint: Checkpoint) -> Self {
        let store = Self::default();
        store.lock().push(checkpoint);
        store
    }

    /// Everything saved so far, in save order.
    pub fn saved(&self) -> Vec<Checkpoint> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Checkpoint>> {
        self.saved.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ICheckpointStore for MemoryCheckpointStore {
    fn save(&self, checkpoint: &Checkpoint) -> MedalResult<()> {
        self.lock().push(checkpoint.clone());
        Ok(())
    }

    fn load_latest(&self, run_id: &str) -> MedalResult<Option<Checkpoint>> {
        Ok(self
            .lock()
            .iter()
            .filter(|c| c.run_id == run_id)
            .max_by_key(|c| (c.record.al_iter, c.record.epoch))
            .cloned())
    }
}
