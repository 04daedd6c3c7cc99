/// An embedding and the position of its item within the pass that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRecord {
    /// Flattened output of the designated layer.
    pub embedding: Vec<f32>,
    /// 0-indexed position of the item in the batch source's order.
    pub position: usize,
    /// Predictive entropy in bits, when the pass scored items.
    pub entropy: Option<f64>,
}

/// Output of one extraction pass. Every record shares the same dimension.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbeddingSet {
    records: Vec<EmbeddingRecord>,
}

impl EmbeddingSet {
    pub fn new(records: Vec<EmbeddingRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding dimension, or `None` for an empty set.
    pub fn dim(&self) -> Option<usize> {
        self.records.first().map(|r| r.embedding.len())
    }

    pub fn records(&self) -> &[EmbeddingRecord] {
        &self.records
    }

    /// Positions parallel to `embeddings()`.
    pub fn positions(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.position).collect()
    }

    pub fn embeddings(&self) -> Vec<&[f32]> {
        self.records.iter().map(|r| r.embedding.as_slice()).collect()
    }
}
