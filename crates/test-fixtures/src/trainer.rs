use std::sync::{Arc, Mutex, PoisonError};

use medal_core::errors::{MedalError, MedalResult};
use medal_core::models::{EpochMetrics, ParameterBlob};
use medal_core::traits::{IBatchSource, IClassifier, ITrainer};

use crate::classifier::LogisticParams;

/// One `train_epoch` invocation as seen by `RecordingTrainer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerCall {
    pub epoch: u32,
    pub indices: Vec<usize>,
}

/// Shared view of the calls a `RecordingTrainer` received.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<TrainerCall>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<TrainerCall> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, call: TrainerCall) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

/// Does not update the model: runs one evaluation pass and records the call.
#[derive(Debug, Default)]
pub struct RecordingTrainer {
    log: CallLog,
    fail_on_call: Option<usize>,
}

impl RecordingTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `call`-th `train_epoch` (0-indexed) fail.
    pub fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl ITrainer for RecordingTrainer {
    fn train_epoch(
        &mut self,
        classifier: &mut dyn IClassifier,
        source: &dyn IBatchSource,
        indices: &[usize],
        epoch: u32,
    ) -> MedalResult<EpochMetrics> {
        let call = self.log.calls().len();
        if self.fail_on_call == Some(call) {
            return Err(MedalError::collaborator(
                "recording trainer",
                format!("epoch {epoch} crashed"),
            ));
        }
        self.log.push(TrainerCall {
            epoch,
            indices: indices.to_vec(),
        });

        let mut loss = 0.0;
        let mut correct = 0usize;
        let mut seen = 0usize;
        for batch in source.batches(indices)? {
            let batch = batch?;
            let probs = classifier.predict(&batch.inputs)?;
            for (&p, &y) in probs.iter().zip(&batch.labels) {
                loss += binary_cross_entropy(p, f64::from(y));
                if (p >= 0.5) == (y >= 0.5) {
                    correct += 1;
                }
                seen += 1;
            }
        }
        Ok(averaged(loss, correct, seen))
    }
}

/// Plain per-sample SGD on a `LogisticClassifier`, through its snapshot blob.
#[derive(Debug)]
pub struct SgdTrainer {
    learning_rate: f32,
    steps: u64,
}

impl SgdTrainer {
    pub fn new(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            steps: 0,
        }
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl ITrainer for SgdTrainer {
    fn train_epoch(
        &mut self,
        classifier: &mut dyn IClassifier,
        source: &dyn IBatchSource,
        indices: &[usize],
        _epoch: u32,
    ) -> MedalResult<EpochMetrics> {
        let mut params = LogisticParams::decode(&classifier.snapshot()?)?;
        let mut loss = 0.0;
        let mut correct = 0usize;
        let mut seen = 0usize;

        for batch in source.batches(indices)? {
            let batch = batch?;
            for (x, &y) in batch.inputs.iter().zip(&batch.labels) {
                let hidden = LogisticParams::hidden(x);
                let p = params.probability(&hidden);
                loss += binary_cross_entropy(p, f64::from(y));
                if (p >= 0.5) == (y >= 0.5) {
                    correct += 1;
                }
                seen += 1;

                let grad = p as f32 - y;
                for (w, h) in params.weights.iter_mut().zip(&hidden) {
                    *w -= self.learning_rate * grad * h;
                }
                params.bias -= self.learning_rate * grad;
                self.steps += 1;
            }
        }

        classifier.restore(&params.encode()?)?;
        Ok(averaged(loss, correct, seen))
    }

    fn optimizer_state(&self) -> MedalResult<Option<ParameterBlob>> {
        Ok(Some(ParameterBlob::new(self.steps.to_le_bytes().to_vec())))
    }

    fn restore_optimizer_state(&mut self, blob: &ParameterBlob) -> MedalResult<()> {
        let bytes: [u8; 8] = blob.as_bytes().try_into().map_err(|_| {
            MedalError::collaborator("sgd trainer", "optimizer state must be 8 bytes")
        })?;
        self.steps = u64::from_le_bytes(bytes);
        Ok(())
    }
}

fn binary_cross_entropy(p: f64, y: f64) -> f64 {
    let p = p.clamp(1e-7, 1.0 - 1e-7);
    -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
}

fn averaged(loss: f64, correct: usize, seen: usize) -> EpochMetrics {
    let n = seen.max(1) as f64;
    EpochMetrics {
        train_loss: loss / n,
        train_accuracy: correct as f64 / n,
        val_loss: None,
        val_accuracy: None,
    }
}
