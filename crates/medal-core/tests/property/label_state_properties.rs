use std::collections::HashSet;

use medal_core::errors::LabelError;
use medal_core::models::LabelState;
use proptest::prelude::*;

proptest! {
    #[test]
    fn marking_is_monotonic(
        pool in 1usize..50,
        rounds in prop::collection::vec(prop::collection::vec(0usize..50, 0..8), 1..6),
    ) {
        let mut labels = LabelState::new((0..pool).map(|i| i + 100).collect());
        for round in rounds {
            let remaining = labels.unlabeled_count();
            if remaining == 0 {
                break;
            }
            let positions: Vec<usize> = round
                .iter()
                .map(|p| p % remaining)
                .collect::<HashSet<_>>()
                .into_iter()
                .collect();

            let before: HashSet<usize> = labels.labeled_indices().into_iter().collect();
            let marked = labels.mark(&positions).unwrap();
            let after: HashSet<usize> = labels.labeled_indices().into_iter().collect();

            prop_assert!(before.is_subset(&after));
            prop_assert_eq!(after.len(), before.len() + positions.len());
            prop_assert!(marked.iter().all(|i| !before.contains(i) && after.contains(i)));
            prop_assert_eq!(labels.labeled_count() + labels.unlabeled_count(), pool);
        }
    }

    #[test]
    fn repeated_position_never_changes_state(
        pool in 2usize..30,
        position in 0usize..30,
    ) {
        let mut labels = LabelState::new((0..pool).collect());
        let position = position % pool;
        let err = labels.mark(&[position, position]).unwrap_err();
        let is_already_labeled = matches!(err, LabelError::AlreadyLabeled { .. });
        prop_assert!(is_already_labeled);
        prop_assert_eq!(labels.labeled_count(), 0);
    }
}
