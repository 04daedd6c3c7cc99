use medal_core::errors::{MedalError, MedalResult};
use medal_core::models::Batch;
use medal_core::traits::{BatchIter, IBatchSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Owned rows served in fixed-size batches.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    rows: Vec<Vec<f32>>,
    labels: Vec<f32>,
    batch_size: usize,
}

impl InMemoryDataset {
    pub fn new(rows: Vec<Vec<f32>>, labels: Vec<f32>, batch_size: usize) -> Self {
        assert_eq!(rows.len(), labels.len(), "one label per row");
        Self {
            rows,
            labels,
            batch_size: batch_size.max(1),
        }
    }

    /// Rows laid out for `ScriptedClassifier`: `[p, embedding...]`.
    /// Labels are `p >= 0.5`.
    pub fn scripted(probs: &[f32], embeddings: &[Vec<f32>], batch_size: usize) -> Self {
        assert_eq!(probs.len(), embeddings.len(), "one embedding per probability");
        let rows = probs
            .iter()
            .zip(embeddings)
            .map(|(&p, e)| std::iter::once(p).chain(e.iter().copied()).collect())
            .collect();
        let labels = probs.iter().map(|&p| if p >= 0.5 { 1.0 } else { 0.0 }).collect();
        Self::new(rows, labels, batch_size)
    }

    /// Two noisy clusters around `+1` and `-1` in every dimension, alternating labels.
    pub fn blobs(n: usize, dim: usize, seed: u64, batch_size: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut rows = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let positive = i % 2 == 0;
            let center = if positive { 1.0 } else { -1.0 };
            rows.push(
                (0..dim)
                    .map(|_| center + rng.random_range(-0.5..0.5))
                    .collect(),
            );
            labels.push(if positive { 1.0 } else { 0.0 });
        }
        Self::new(rows, labels, batch_size)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl IBatchSource for InMemoryDataset {
    fn batches<'a>(&'a self, indices: &'a [usize]) -> MedalResult<BatchIter<'a>> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.rows.len()) {
            return Err(MedalError::collaborator(
                "in-memory dataset",
                format!("index {bad} out of range for {} rows", self.rows.len()),
            ));
        }
        Ok(Box::new(indices.chunks(self.batch_size).map(move |chunk| {
            Ok(Batch::new(
                chunk.iter().map(|&i| self.rows[i].clone()).collect(),
                chunk.iter().map(|&i| self.labels[i]).collect(),
            ))
        })))
    }
}
