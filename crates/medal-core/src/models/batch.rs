use serde::{Deserialize, Serialize};

/// One batch yielded by a batch source: flattened inputs and their labels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Batch {
    /// One flattened input tensor per item.
    pub inputs: Vec<Vec<f32>>,
    /// Binary ground-truth label per item (0.0 or 1.0).
    pub labels: Vec<f32>,
}

impl Batch {
    pub fn new(inputs: Vec<Vec<f32>>, labels: Vec<f32>) -> Self {
        Self { inputs, labels }
    }

    /// Number of items in the batch.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}
