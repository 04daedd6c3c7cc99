//! Scoped capture of the embedding layer.
//!
//! The tap is attached when the guard is created and detached when it is
//! dropped, so an early return or `?` anywhere in the pass still leaves the
//! classifier untouched.

use medal_core::errors::{MedalResult, SelectionError};
use medal_core::models::LayerId;
use medal_core::traits::IClassifier;

pub struct ScopedTap<'c> {
    classifier: &'c mut dyn IClassifier,
    layer: LayerId,
}

impl<'c> ScopedTap<'c> {
    /// Attach a tap on `layer`. If attaching fails nothing is installed.
    pub fn install(classifier: &'c mut dyn IClassifier, layer: LayerId) -> MedalResult<Self> {
        classifier.attach_tap(&layer)?;
        tracing::trace!(layer = %layer, "embedding tap attached");
        Ok(Self { classifier, layer })
    }

    /// One forward pass: probabilities and the tapped layer output, one of
    /// each per input.
    pub fn forward(&mut self, inputs: &[Vec<f32>]) -> MedalResult<(Vec<f64>, Vec<Vec<f32>>)> {
        // Drop anything left over from a pass we did not drive.
        self.classifier.take_tapped();

        let probs = self.classifier.predict(inputs)?;
        if probs.len() != inputs.len() {
            return Err(SelectionError::CountMismatch {
                context: "classifier probabilities".to_string(),
                expected: inputs.len(),
                actual: probs.len(),
            }
            .into());
        }

        let tapped = self.classifier.take_tapped().unwrap_or_default();
        if tapped.len() != inputs.len() {
            return Err(SelectionError::CountMismatch {
                context: format!("embeddings tapped from {}", self.layer),
                expected: inputs.len(),
                actual: tapped.len(),
            }
            .into());
        }
        Ok((probs, tapped))
    }
}

impl Drop for ScopedTap<'_> {
    fn drop(&mut self) {
        self.classifier.detach_tap();
        tracing::trace!(layer = %self.layer, "embedding tap detached");
    }
}
