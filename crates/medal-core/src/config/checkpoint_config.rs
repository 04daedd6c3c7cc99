use serde::{Deserialize, Serialize};

use super::defaults;

/// Checkpoint persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    /// Root directory; each run writes under `<dir>/<run_id>/`.
    pub dir: String,
    /// Save every N epochs (and at the end of each iteration). 0 disables saving.
    pub interval: u32,
}

impl CheckpointConfig {
    pub fn enabled(&self) -> bool {
        self.interval > 0
    }
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            dir: defaults::DEFAULT_CHECKPOINT_DIR.to_string(),
            interval: defaults::DEFAULT_CHECKPOINT_INTERVAL,
        }
    }
}
