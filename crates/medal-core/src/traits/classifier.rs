use crate::errors::MedalResult;
use crate::models::{LayerId, ParameterBlob};

/// A binary classifier that can expose one internal layer during inference.
///
/// Tap protocol: `attach_tap` registers interception of a layer; every
/// subsequent `predict` stores that layer's per-item output in an internal
/// slot, which `take_tapped` drains. `detach_tap` removes the interception.
/// Callers should go through a scoped guard so the tap never outlives the
/// pass it was installed for.
pub trait IClassifier: Send {
    /// Forward pass in inference mode. Returns P(y = 1) per input.
    fn predict(&mut self, inputs: &[Vec<f32>]) -> MedalResult<Vec<f64>>;

    /// Start intercepting the output of `layer`.
    fn attach_tap(&mut self, layer: &LayerId) -> MedalResult<()>;

    /// Stop intercepting. Must be safe to call when no tap is attached.
    fn detach_tap(&mut self);

    /// Drain activations captured since the last call, one row per item.
    fn take_tapped(&mut self) -> Option<Vec<Vec<f32>>>;

    /// Serialize the current parameters.
    fn snapshot(&self) -> MedalResult<ParameterBlob>;

    /// Replace the current parameters with a previous snapshot.
    fn restore(&mut self, blob: &ParameterBlob) -> MedalResult<()>;
}
