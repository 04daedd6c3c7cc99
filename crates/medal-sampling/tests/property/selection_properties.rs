use std::collections::HashSet;

use medal_core::models::LayerId;
use medal_core::traits::IBatchSource;
use medal_sampling::{binary_entropy, select_diverse, EntropyTopKExtractor, TopK};
use proptest::prelude::*;
use test_fixtures::{InMemoryDataset, ScriptedClassifier, SCRIPTED_LAYER};

fn embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, dim)
}

proptest! {
    #[test]
    fn entropy_is_bounded(p in 0.0f64..=1.0) {
        let h = binary_entropy(p);
        prop_assert!((0.0..=1.0 + 1e-12).contains(&h), "H({}) = {}", p, h);
    }

    #[test]
    fn topk_matches_brute_force(
        probs in prop::collection::vec(0.0f32..=1.0, 1..40),
        k in 1usize..15,
        batch_size in 1usize..8,
    ) {
        let embeddings: Vec<Vec<f32>> = (0..probs.len()).map(|i| vec![i as f32]).collect();
        let ds = InMemoryDataset::scripted(&probs, &embeddings, batch_size);
        let indices: Vec<usize> = (0..probs.len()).collect();
        let mut clf = ScriptedClassifier::new();
        let extractor = EntropyTopKExtractor::new(&LayerId::new(SCRIPTED_LAYER));
        let set = extractor
            .extract(&mut clf, ds.batches(&indices).unwrap(), TopK::highest(k).unwrap())
            .unwrap();

        let mut expected: Vec<(usize, f64)> = probs
            .iter()
            .enumerate()
            .map(|(i, &p)| (i, binary_entropy(f64::from(p))))
            .collect();
        expected.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        expected.truncate(k);

        prop_assert_eq!(set.len(), k.min(probs.len()));
        let got: Vec<f64> = set.records().iter().map(|r| r.entropy.unwrap()).collect();
        let want: Vec<f64> = expected.iter().map(|&(_, h)| h).collect();
        prop_assert_eq!(got, want);
        for record in set.records() {
            prop_assert_eq!(record.embedding[0] as usize, record.position);
        }
    }

    #[test]
    fn extract_all_covers_the_pool(n in 0usize..30, batch_size in 1usize..6) {
        let probs: Vec<f32> = (0..n).map(|i| (i % 10) as f32 / 10.0).collect();
        let embeddings: Vec<Vec<f32>> = (0..n).map(|i| vec![i as f32, 1.0]).collect();
        let ds = InMemoryDataset::scripted(&probs, &embeddings, batch_size);
        let indices: Vec<usize> = (0..n).collect();
        let mut clf = ScriptedClassifier::new();
        let extractor = EntropyTopKExtractor::new(&LayerId::new(SCRIPTED_LAYER));
        let set = extractor
            .extract(&mut clf, ds.batches(&indices).unwrap(), TopK::All)
            .unwrap();
        prop_assert_eq!(set.positions(), indices);
    }

    #[test]
    fn diverse_picks_are_distinct_and_in_range(
        labeled in prop::collection::vec(embedding(3), 1..6),
        candidates in prop::collection::vec(embedding(3), 0..25),
        n in 1usize..10,
    ) {
        let labeled: Vec<&[f32]> = labeled.iter().map(Vec::as_slice).collect();
        let candidates_ref: Vec<&[f32]> = candidates.iter().map(Vec::as_slice).collect();
        let picks = select_diverse(&labeled, &candidates_ref, n).unwrap();

        prop_assert_eq!(picks.len(), n.min(candidates.len()));
        prop_assert!(picks.iter().all(|&p| p < candidates.len()));
        prop_assert_eq!(picks.iter().collect::<HashSet<_>>().len(), picks.len());
    }
}
