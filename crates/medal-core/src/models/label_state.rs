//! Which training indices have been labeled.
//!
//! Positions passed to [`LabelState::mark`] are relative to the current
//! unlabeled pool, i.e. they index into `unlabeled_indices()`. Flags only
//! ever go from false to true.

use serde::{Deserialize, Serialize};

use crate::errors::LabelError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelState {
    /// Dataset indices of the training split, fixed at construction.
    train_indices: Vec<usize>,
    /// One flag per entry of `train_indices`.
    is_labeled: Vec<bool>,
    /// Dataset indices labeled by the most recent `mark`.
    #[serde(default)]
    last_marked: Vec<usize>,
}

impl LabelState {
    /// Start with every training index unlabeled.
    pub fn new(train_indices: Vec<usize>) -> Self {
        let is_labeled = vec![false; train_indices.len()];
        Self {
            train_indices,
            is_labeled,
            last_marked: Vec::new(),
        }
    }

    /// Check that the flag array lines up with the training indices.
    /// Used after deserializing a checkpoint.
    pub fn validate(&self) -> Result<(), LabelError> {
        if self.is_labeled.len() != self.train_indices.len() {
            return Err(LabelError::LengthMismatch {
                flags: self.is_labeled.len(),
                indices: self.train_indices.len(),
            });
        }
        Ok(())
    }

    pub fn train_indices(&self) -> &[usize] {
        &self.train_indices
    }

    /// Size of the training index set.
    pub fn len(&self) -> usize {
        self.train_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.train_indices.is_empty()
    }

    pub fn labeled_count(&self) -> usize {
        self.is_labeled.iter().filter(|&&l| l).count()
    }

    pub fn unlabeled_count(&self) -> usize {
        self.len() - self.labeled_count()
    }

    /// Dataset indices currently labeled, in training-set order.
    pub fn labeled_indices(&self) -> Vec<usize> {
        self.collect_where(true)
    }

    /// Dataset indices not yet labeled, in training-set order.
    pub fn unlabeled_indices(&self) -> Vec<usize> {
        self.collect_where(false)
    }

    /// True once every training index is labeled.
    pub fn is_exhausted(&self) -> bool {
        self.is_labeled.iter().all(|&l| l)
    }

    pub fn last_marked(&self) -> &[usize] {
        &self.last_marked
    }

    /// Label the items at the given unlabeled-pool positions.
    ///
    /// Returns the dataset indices that were labeled, in the order given.
    /// Every position is validated before any flag changes, so an error
    /// leaves the state untouched.
    pub fn mark(&mut self, positions: &[usize]) -> Result<Vec<usize>, LabelError> {
        let unlabeled_slots: Vec<usize> = self
            .is_labeled
            .iter()
            .enumerate()
            .filter(|&(_, &labeled)| !labeled)
            .map(|(slot, _)| slot)
            .collect();

        let mut pending = vec![false; self.is_labeled.len()];
        let mut slots = Vec::with_capacity(positions.len());
        for &position in positions {
            let slot = *unlabeled_slots
                .get(position)
                .ok_or(LabelError::PositionOutOfRange {
                    position,
                    pool_size: unlabeled_slots.len(),
                })?;
            if self.is_labeled[slot] || pending[slot] {
                return Err(LabelError::AlreadyLabeled {
                    index: self.train_indices[slot],
                });
            }
            pending[slot] = true;
            slots.push(slot);
        }

        let marked: Vec<usize> = slots
            .into_iter()
            .map(|slot| {
                self.is_labeled[slot] = true;
                self.train_indices[slot]
            })
            .collect();
        self.last_marked = marked.clone();
        Ok(marked)
    }

    fn collect_where(&self, labeled: bool) -> Vec<usize> {
        self.train_indices
            .iter()
            .zip(&self.is_labeled)
            .filter(|&(_, &flag)| flag == labeled)
            .map(|(&index, _)| index)
            .collect()
    }
}
