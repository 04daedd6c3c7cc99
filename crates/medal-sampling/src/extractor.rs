//! One streaming pass over a batch source: entropy and embedding per item,
//! keeping either everything or only the K most uncertain items.
//!
//! Peak memory is bounded by `K + batch` records in top-K mode.

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use medal_core::errors::{MedalResult, SelectionError};
use medal_core::models::{Batch, EmbeddingRecord, EmbeddingSet, LayerId};
use medal_core::traits::{IClassifier, IEmbeddingLayerSelector};

use crate::entropy::checked_entropy;
use crate::tap::ScopedTap;

/// How many records an extraction pass keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopK {
    /// Keep every item, in pass order.
    All,
    /// Keep the K highest-entropy items, highest first.
    Highest(NonZeroUsize),
}

impl TopK {
    /// `Highest(k)`, or `None` when `k` is zero.
    pub fn highest(k: usize) -> Option<Self> {
        NonZeroUsize::new(k).map(Self::Highest)
    }
}

#[derive(Debug, Clone)]
pub struct EntropyTopKExtractor {
    layer: LayerId,
}

impl EntropyTopKExtractor {
    pub fn new(selector: &dyn IEmbeddingLayerSelector) -> Self {
        Self {
            layer: selector.embedding_layer(),
        }
    }

    pub fn layer(&self) -> &LayerId {
        &self.layer
    }

    /// Run `classifier` once per batch, scoring and embedding every item.
    ///
    /// Record positions are 0-indexed in batch order across the whole pass.
    /// In top-K mode records are ordered by entropy descending; equal
    /// entropies keep the earlier position first.
    pub fn extract<I>(
        &self,
        classifier: &mut dyn IClassifier,
        batches: I,
        topk: TopK,
    ) -> MedalResult<EmbeddingSet>
    where
        I: IntoIterator<Item = MedalResult<Batch>>,
    {
        let mut tap = ScopedTap::install(classifier, self.layer.clone())?;
        let mut kept: Vec<EmbeddingRecord> = Vec::new();
        let mut dim: Option<usize> = None;
        let mut position = 0usize;

        for batch in batches {
            let batch = batch?;
            let (probs, tapped) = tap.forward(&batch.inputs)?;

            for (probability, embedding) in probs.into_iter().zip(tapped) {
                match dim {
                    None => dim = Some(embedding.len()),
                    Some(expected) if expected != embedding.len() => {
                        return Err(SelectionError::DimensionMismatch {
                            expected,
                            actual: embedding.len(),
                        }
                        .into());
                    }
                    Some(_) => {}
                }
                if embedding.iter().any(|v| !v.is_finite()) {
                    return Err(SelectionError::NonFiniteEmbedding { position }.into());
                }
                let entropy = checked_entropy(position, probability)?;
                kept.push(EmbeddingRecord {
                    embedding,
                    position,
                    entropy: Some(entropy),
                });
                position += 1;
            }

            if let TopK::Highest(k) = topk {
                kept.sort_by(|a, b| by_entropy_desc(a, b));
                kept.truncate(k.get());
            }
        }

        tracing::debug!(
            layer = %self.layer,
            items = position,
            kept = kept.len(),
            ?topk,
            "extraction pass complete"
        );
        Ok(EmbeddingSet::new(kept))
    }
}

fn by_entropy_desc(a: &EmbeddingRecord, b: &EmbeddingRecord) -> Ordering {
    let ha = a.entropy.unwrap_or(0.0);
    let hb = b.entropy.unwrap_or(0.0);
    hb.partial_cmp(&ha).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medal_core::traits::IBatchSource;
    use test_fixtures::{InMemoryDataset, ScriptedClassifier, SCRIPTED_LAYER};

    fn extractor() -> EntropyTopKExtractor {
        EntropyTopKExtractor::new(&LayerId::new(SCRIPTED_LAYER))
    }

    fn dataset(probs: &[f32]) -> InMemoryDataset {
        let embeddings = (0..probs.len()).map(|i| vec![i as f32, 0.0]).collect::<Vec<_>>();
        InMemoryDataset::scripted(probs, &embeddings, 2)
    }

    #[test]
    fn all_mode_keeps_every_item_in_order() {
        let ds = dataset(&[0.1, 0.9, 0.5, 0.0, 1.0]);
        let indices: Vec<usize> = (0..5).collect();
        let mut clf = ScriptedClassifier::new();
        let set = extractor()
            .extract(&mut clf, ds.batches(&indices).unwrap(), TopK::All)
            .unwrap();
        assert_eq!(set.positions(), vec![0, 1, 2, 3, 4]);
        assert_eq!(set.dim(), Some(2));
        assert_eq!(set.records()[3].entropy, Some(0.0));
    }

    #[test]
    fn topk_keeps_most_uncertain_first() {
        let ds = dataset(&[0.1, 0.5, 0.95, 0.4, 0.7]);
        let indices: Vec<usize> = (0..5).collect();
        let mut clf = ScriptedClassifier::new();
        let set = extractor()
            .extract(
                &mut clf,
                ds.batches(&indices).unwrap(),
                TopK::highest(3).unwrap(),
            )
            .unwrap();
        assert_eq!(set.positions(), vec![1, 3, 4]);
        // The embedding travels with its position.
        assert_eq!(set.records()[1].embedding, vec![3.0, 0.0]);
    }

    #[test]
    fn ties_keep_earlier_position() {
        let ds = dataset(&[0.3, 0.5, 0.5, 0.5]);
        let indices: Vec<usize> = (0..4).collect();
        let mut clf = ScriptedClassifier::new();
        let set = extractor()
            .extract(
                &mut clf,
                ds.batches(&indices).unwrap(),
                TopK::highest(2).unwrap(),
            )
            .unwrap();
        assert_eq!(set.positions(), vec![1, 2]);
    }

    #[test]
    fn k_larger_than_pool_keeps_pool() {
        let ds = dataset(&[0.2, 0.6]);
        let mut clf = ScriptedClassifier::new();
        let set = extractor()
            .extract(
                &mut clf,
                ds.batches(&[0, 1]).unwrap(),
                TopK::highest(10).unwrap(),
            )
            .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn nan_probability_aborts_and_detaches() {
        let ds = dataset(&[0.2, f32::NAN, 0.4]);
        let mut clf = ScriptedClassifier::new();
        let probe = clf.probe();
        let err = extractor()
            .extract(&mut clf, ds.batches(&[0, 1, 2]).unwrap(), TopK::All)
            .unwrap_err();
        assert!(err.is_invariant_violation());
        assert!(!probe.tap_attached());
    }

    #[test]
    fn mixed_dimensions_are_rejected() {
        let ds = InMemoryDataset::scripted(&[0.2, 0.4], &[vec![1.0], vec![1.0, 2.0]], 1);
        let mut clf = ScriptedClassifier::new();
        let err = extractor()
            .extract(&mut clf, ds.batches(&[0, 1]).unwrap(), TopK::All)
            .unwrap_err();
        assert!(matches!(
            err,
            medal_core::MedalError::Selection(SelectionError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn non_finite_embedding_aborts_and_detaches() {
        let ds = InMemoryDataset::scripted(
            &[0.2, 0.4, 0.6],
            &[vec![1.0, 0.0], vec![f32::NAN, 0.0], vec![2.0, f32::INFINITY]],
            2,
        );
        let mut clf = ScriptedClassifier::new();
        let probe = clf.probe();
        let err = extractor()
            .extract(&mut clf, ds.batches(&[0, 1, 2]).unwrap(), TopK::All)
            .unwrap_err();
        assert!(matches!(
            err,
            medal_core::MedalError::Selection(SelectionError::NonFiniteEmbedding { position: 1 })
        ));
        assert!(err.is_invariant_violation());
        assert!(!probe.tap_attached());
    }

    #[test]
    fn empty_pass_is_empty() {
        let ds = dataset(&[0.2]);
        let mut clf = ScriptedClassifier::new();
        let set = extractor()
            .extract(&mut clf, ds.batches(&[]).unwrap(), TopK::All)
            .unwrap();
        assert!(set.is_empty());
    }
}
