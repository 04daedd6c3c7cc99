use std::collections::HashSet;

use medal_core::models::LabelState;
use medal_core::traits::ITrainingSetPolicy;
use medal_learning::{FullPolicy, OnlineSamplePolicy};
use proptest::prelude::*;

/// A label state after marking `first` then `second` pool positions
/// (each taken modulo the remaining pool).
fn labeled(pool: usize, first: &[usize], second: &[usize]) -> LabelState {
    let mut labels = LabelState::new((0..pool).map(|i| i * 2).collect());
    for round in [first, second] {
        let remaining = labels.unlabeled_count();
        if remaining == 0 {
            continue;
        }
        let positions: Vec<usize> = round
            .iter()
            .map(|p| p % remaining)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        labels.mark(&positions).unwrap();
    }
    labels
}

proptest! {
    #[test]
    fn partition_holds_after_marking(
        pool in 1usize..40,
        first in prop::collection::vec(0usize..40, 0..10),
        second in prop::collection::vec(0usize..40, 0..10),
    ) {
        let labels = labeled(pool, &first, &second);
        let l: HashSet<usize> = labels.labeled_indices().into_iter().collect();
        let u: HashSet<usize> = labels.unlabeled_indices().into_iter().collect();
        prop_assert!(l.is_disjoint(&u));
        prop_assert_eq!(l.len() + u.len(), pool);
        prop_assert_eq!(labels.is_exhausted(), u.is_empty());
    }

    #[test]
    fn online_set_size_and_membership(
        pool in 1usize..40,
        first in prop::collection::vec(0usize..40, 1..10),
        second in prop::collection::vec(0usize..40, 1..10),
        frac in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let labels = labeled(pool, &first, &second);
        let newly: HashSet<usize> = labels.last_marked().iter().copied().collect();
        let previous = labels.labeled_count() - newly.len();

        let mut policy = OnlineSamplePolicy::new(frac, seed).unwrap();
        let set = policy.build(&labels);

        let expected = (previous as f64 * frac).floor() as usize + newly.len();
        prop_assert_eq!(set.len(), expected);
        let distinct: HashSet<usize> = set.iter().copied().collect();
        prop_assert_eq!(distinct.len(), set.len());
        prop_assert!(newly.is_subset(&distinct));
        let all: HashSet<usize> = labels.labeled_indices().into_iter().collect();
        prop_assert!(distinct.is_subset(&all));
    }

    #[test]
    fn full_set_is_every_labeled_index(
        pool in 1usize..40,
        first in prop::collection::vec(0usize..40, 0..10),
    ) {
        let labels = labeled(pool, &first, &[]);
        prop_assert_eq!(FullPolicy.build(&labels), labels.labeled_indices());
    }
}
