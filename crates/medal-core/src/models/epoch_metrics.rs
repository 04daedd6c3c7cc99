use serde::{Deserialize, Serialize};

/// Loss and accuracy reported by the trainer after one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub train_loss: f64,
    pub train_accuracy: f64,
    /// Validation metrics, when the trainer evaluates a held-out split.
    pub val_loss: Option<f64>,
    pub val_accuracy: Option<f64>,
}
