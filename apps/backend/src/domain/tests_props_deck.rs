use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::deck::{pick_after_reset, pick_next_card, DeckPick};
use crate::domain::rng::SeededRandom;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// N enabled cards give N distinct draws, then the cycle is exhausted.
    #[test]
    fn prop_full_cycle_before_repeat(
        pool in proptest::collection::hash_set(1i64..10_000, 1..60),
        seed in any::<u64>(),
    ) {
        let mut eligible: Vec<i64> = pool.into_iter().collect();
        eligible.sort_unstable();
        let rng = SeededRandom::from_seed(seed);

        let mut played = HashSet::new();
        let mut last = None;
        for _ in 0..eligible.len() {
            match pick_next_card(&eligible, &played, &rng) {
                DeckPick::Card(id) => {
                    prop_assert!(eligible.contains(&id));
                    prop_assert!(played.insert(id), "card {} repeated within a cycle", id);
                    last = Some(id);
                }
                other => prop_assert!(false, "unexpected {:?} before the cycle ended", other),
            }
        }
        prop_assert_eq!(pick_next_card(&eligible, &played, &rng), DeckPick::Exhausted);

        // The new cycle draws from the full pool, minus the card just played.
        match pick_after_reset(&eligible, last, &rng) {
            DeckPick::Card(id) if eligible.len() > 1 => prop_assert_ne!(Some(id), last),
            DeckPick::Card(id) => prop_assert_eq!(Some(id), last),
            other => prop_assert!(false, "unexpected {:?} after a reset", other),
        }
    }
}
