//! Property tests: lookups only ever reach the function registered for the exact pair.

use model_mapper::{Mapper, MapperError, ModelKey, Transformation};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

/// Generate a set of distinct (source, destination) index pairs over `n` keys.
fn arb_pairs(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::btree_set((0..n, 0..n), 1..8).prop_map(|set| set.into_iter().collect())
}

fn keys(n: usize) -> Vec<ModelKey> {
    (0..n).map(|i| ModelKey::token(format!("k{}", i))).collect()
}

/// Each pair's function tags its output with the pair it was registered for.
fn register_all(mapper: &Mapper, keys: &[ModelKey], pairs: &[(usize, usize)]) {
    for &(s, d) in pairs {
        mapper
            .register(Transformation::new(
                keys[s].clone(),
                keys[d].clone(),
                move |v: u32| (s, d, v),
            ))
            .unwrap();
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn mapping_invokes_only_its_own_function(pairs in arb_pairs(6), value in any::<u32>()) {
        let keys = keys(6);
        let mapper = Mapper::new();
        register_all(&mapper, &keys, &pairs);

        for s in 0..6 {
            for d in 0..6 {
                let result = mapper.map::<u32, (usize, usize, u32)>(&keys[s], &keys[d], value);
                if pairs.contains(&(s, d)) {
                    prop_assert_eq!(result.unwrap(), (s, d, value));
                } else {
                    prop_assert!(
                        matches!(result, Err(MapperError::MappingNotFound { .. })),
                        "pair ({}, {}) should be unmapped",
                        s,
                        d
                    );
                }
            }
        }
    }

    #[test]
    fn duplicates_never_replace(pairs in arb_pairs(5), value in any::<u32>()) {
        let keys = keys(5);
        let mapper = Mapper::new();
        register_all(&mapper, &keys, &pairs);

        for &(s, d) in &pairs {
            let err = mapper
                .register(Transformation::new(
                    keys[s].clone(),
                    keys[d].clone(),
                    |v: u32| (usize::MAX, usize::MAX, v),
                ))
                .unwrap_err();
            let is_duplicate = matches!(err, MapperError::DuplicateMapping { .. });
            prop_assert!(is_duplicate);
        }

        prop_assert_eq!(mapper.len().unwrap(), pairs.len());
        for &(s, d) in &pairs {
            let result = mapper.map::<u32, (usize, usize, u32)>(&keys[s], &keys[d], value);
            prop_assert_eq!(result.unwrap(), (s, d, value));
        }
    }

    #[test]
    fn delete_removes_exactly_one_pair(pairs in arb_pairs(5), pick in any::<prop::sample::Index>()) {
        let keys = keys(5);
        let mapper = Mapper::new();
        register_all(&mapper, &keys, &pairs);

        let (s, d) = pairs[pick.index(pairs.len())];
        prop_assert!(mapper.delete_mapping(&keys[s], &keys[d]).unwrap());
        prop_assert!(!mapper.contains(&keys[s], &keys[d]).unwrap());
        prop_assert_eq!(mapper.len().unwrap(), pairs.len() - 1);

        for &(other_s, other_d) in pairs.iter().filter(|&&p| p != (s, d)) {
            prop_assert!(mapper.contains(&keys[other_s], &keys[other_d]).unwrap());
        }
    }

    #[test]
    fn clear_empties_every_pair(pairs in arb_pairs(4)) {
        let keys = keys(4);
        let mapper = Mapper::new();
        register_all(&mapper, &keys, &pairs);

        mapper.clear().unwrap();
        for &(s, d) in &pairs {
            let result = mapper.map::<u32, (usize, usize, u32)>(&keys[s], &keys[d], 0);
            let is_not_found = matches!(result, Err(MapperError::MappingNotFound { .. }));
            prop_assert!(is_not_found);
        }
    }
}
