use medal_core::errors::SelectionError;

/// Mean of a set of embeddings, remembering how many points went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    vector: Vec<f64>,
    count: usize,
}

impl Centroid {
    /// Mean of `embeddings`. All must share one dimension.
    pub fn from_embeddings(embeddings: &[&[f32]]) -> Result<Self, SelectionError> {
        let first = embeddings.first().ok_or(SelectionError::EmptyLabeledSet)?;
        let dim = first.len();
        let mut sum = vec![0.0f64; dim];
        for emb in embeddings {
            if emb.len() != dim {
                return Err(SelectionError::DimensionMismatch {
                    expected: dim,
                    actual: emb.len(),
                });
            }
            for (s, &v) in sum.iter_mut().zip(emb.iter()) {
                *s += v as f64;
            }
        }
        let n = embeddings.len() as f64;
        let vector = sum.into_iter().map(|s| s / n).collect();
        Ok(Self {
            vector,
            count: embeddings.len(),
        })
    }

    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn dim(&self) -> usize {
        self.vector.len()
    }

    /// Centroid of this set plus `extra_count` more points whose
    /// coordinate-wise sum is `extra_sum`.
    pub fn merged_with(&self, extra_sum: &[f64], extra_count: usize) -> Self {
        let total = self.count + extra_count;
        if extra_count == 0 || total == 0 {
            return self.clone();
        }
        let old_weight = self.count as f64 / total as f64;
        let new_weight = 1.0 / total as f64;
        let vector = self
            .vector
            .iter()
            .zip(extra_sum)
            .map(|(&c, &s)| old_weight * c + new_weight * s)
            .collect();
        Self {
            vector,
            count: total,
        }
    }
}
