use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use medal_core::errors::{MedalError, MedalResult};
use medal_core::models::{LayerId, ParameterBlob};
use medal_core::traits::IClassifier;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// The only layer `ScriptedClassifier` can tap.
pub const SCRIPTED_LAYER: &str = "scripted.embedding";
/// The only layer `LogisticClassifier` can tap.
pub const HIDDEN_LAYER: &str = "hidden";

/// Shared counters so tests can observe a classifier after handing it over.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProbe {
    forward_passes: Arc<AtomicUsize>,
    restores: Arc<AtomicUsize>,
    detaches: Arc<AtomicUsize>,
    tap_attached: Arc<AtomicBool>,
}

impl ScriptedProbe {
    pub fn forward_passes(&self) -> usize {
        self.forward_passes.load(Ordering::SeqCst)
    }

    pub fn restores(&self) -> usize {
        self.restores.load(Ordering::SeqCst)
    }

    pub fn detaches(&self) -> usize {
        self.detaches.load(Ordering::SeqCst)
    }

    pub fn tap_attached(&self) -> bool {
        self.tap_attached.load(Ordering::SeqCst)
    }
}

/// Reads its output from the input row: `row[0]` is P(y = 1) and
/// `row[1..]` is the embedding exposed on [`SCRIPTED_LAYER`].
#[derive(Debug, Default)]
pub struct ScriptedClassifier {
    probe: ScriptedProbe,
    tap: Option<LayerId>,
    slot: Option<Vec<Vec<f32>>>,
    fail_on_pass: Option<usize>,
    generation: u64,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `pass`-th forward pass (0-indexed) fail.
    pub fn failing_on_pass(mut self, pass: usize) -> Self {
        self.fail_on_pass = Some(pass);
        self
    }

    pub fn probe(&self) -> ScriptedProbe {
        self.probe.clone()
    }

    /// Bumped by tests to tell snapshots apart.
    pub fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl IClassifier for ScriptedClassifier {
    fn predict(&mut self, inputs: &[Vec<f32>]) -> MedalResult<Vec<f64>> {
        let pass = self.probe.forward_passes.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_pass == Some(pass) {
            return Err(MedalError::collaborator(
                "scripted classifier",
                format!("forward pass {pass} failed"),
            ));
        }
        if self.tap.is_some() {
            self.slot = Some(
                inputs
                    .iter()
                    .map(|row| row.get(1..).unwrap_or_default().to_vec())
                    .collect(),
            );
        }
        Ok(inputs
            .iter()
            .map(|row| row.first().copied().map_or(0.5, f64::from))
            .collect())
    }

    fn attach_tap(&mut self, layer: &LayerId) -> MedalResult<()> {
        if layer.as_str() != SCRIPTED_LAYER {
            return Err(MedalError::collaborator(
                "scripted classifier",
                format!("unknown layer {layer}"),
            ));
        }
        self.tap = Some(layer.clone());
        self.probe.tap_attached.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn detach_tap(&mut self) {
        self.tap = None;
        self.slot = None;
        self.probe.tap_attached.store(false, Ordering::SeqCst);
        self.probe.detaches.fetch_add(1, Ordering::SeqCst);
    }

    fn take_tapped(&mut self) -> Option<Vec<Vec<f32>>> {
        self.slot.take()
    }

    fn snapshot(&self) -> MedalResult<ParameterBlob> {
        Ok(ParameterBlob::new(self.generation.to_le_bytes().to_vec()))
    }

    fn restore(&mut self, blob: &ParameterBlob) -> MedalResult<()> {
        let bytes: [u8; 8] = blob.as_bytes().try_into().map_err(|_| {
            MedalError::collaborator(
                "scripted classifier",
                format!("expected 8-byte snapshot, got {}", blob.len()),
            )
        })?;
        self.generation = u64::from_le_bytes(bytes);
        self.probe.restores.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Parameters of `LogisticClassifier`; also its snapshot format (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    pub weights: Vec<f32>,
    pub bias: f32,
}

impl LogisticParams {
    pub fn encode(&self) -> MedalResult<ParameterBlob> {
        Ok(ParameterBlob::new(serde_json::to_vec(self)?))
    }

    pub fn decode(blob: &ParameterBlob) -> MedalResult<Self> {
        Ok(serde_json::from_slice(blob.as_bytes())?)
    }

    /// `tanh` of each input feature; exposed as the [`HIDDEN_LAYER`] output.
    pub fn hidden(x: &[f32]) -> Vec<f32> {
        x.iter().map(|v| v.tanh()).collect()
    }

    pub fn probability(&self, hidden: &[f32]) -> f64 {
        let z: f32 = self
            .weights
            .iter()
            .zip(hidden)
            .map(|(w, h)| w * h)
            .sum::<f32>()
            + self.bias;
        1.0 / (1.0 + (-f64::from(z)).exp())
    }
}

/// Logistic regression over a `tanh` feature layer.
#[derive(Debug)]
pub struct LogisticClassifier {
    params: LogisticParams,
    tap: bool,
    slot: Option<Vec<Vec<f32>>>,
}

impl LogisticClassifier {
    /// Small random initial weights, reproducible from `seed`.
    pub fn new(dim: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let weights = (0..dim).map(|_| rng.random_range(-0.1..0.1)).collect();
        Self {
            params: LogisticParams { weights, bias: 0.0 },
            tap: false,
            slot: None,
        }
    }

    pub fn params(&self) -> &LogisticParams {
        &self.params
    }
}

impl IClassifier for LogisticClassifier {
    fn predict(&mut self, inputs: &[Vec<f32>]) -> MedalResult<Vec<f64>> {
        let hidden: Vec<Vec<f32>> = inputs.iter().map(|x| LogisticParams::hidden(x)).collect();
        let probs = hidden.iter().map(|h| self.params.probability(h)).collect();
        if self.tap {
            self.slot = Some(hidden);
        }
        Ok(probs)
    }

    fn attach_tap(&mut self, layer: &LayerId) -> MedalResult<()> {
        if layer.as_str() != HIDDEN_LAYER {
            return Err(MedalError::collaborator(
                "logistic classifier",
                format!("unknown layer {layer}"),
            ));
        }
        self.tap = true;
        Ok(())
    }

    fn detach_tap(&mut self) {
        self.tap = false;
        self.slot = None;
    }

    fn take_tapped(&mut self) -> Option<Vec<Vec<f32>>> {
        self.slot.take()
    }

    fn snapshot(&self) -> MedalResult<ParameterBlob> {
        self.params.encode()
    }

    fn restore(&mut self, blob: &ParameterBlob) -> MedalResult<()> {
        self.params = LogisticParams::decode(blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_reads_probability_and_embedding_from_row() {
        let mut c = ScriptedClassifier::new();
        c.attach_tap(&LayerId::new(SCRIPTED_LAYER)).unwrap();
        let probs = c.predict(&[vec![0.25, 1.0, 2.0]]).unwrap();
        assert_eq!(probs, vec![0.25]);
        assert_eq!(c.take_tapped(), Some(vec![vec![1.0, 2.0]]));
        assert_eq!(c.take_tapped(), None);
    }

    #[test]
    fn scripted_snapshot_restores_generation() {
        let mut c = ScriptedClassifier::new();
        c.set_generation(3);
        let blob = c.snapshot().unwrap();
        c.set_generation(9);
        c.restore(&blob).unwrap();
        assert_eq!(c.generation(), 3);
        assert_eq!(c.probe().restores(), 1);
    }

    #[test]
    fn logistic_snapshot_round_trips() {
        let mut c = LogisticClassifier::new(4, 1);
        let blob = c.snapshot().unwrap();
        let before = c.params().clone();
        c.restore(&blob).unwrap();
        assert_eq!(c.params(), &before);
    }
}
