// SymTable property tests over the public API.
//
// Property 1: key uniqueness and round-trip across growth.
//  - Model: BTreeMap of live bindings.
//  - Operations: put, remove, replace over a key space wider than the first
//    capacity, so long runs cross the 509 -> 1021 boundary.
//  - Invariant: len() == model.len() after every op; every model binding is
//    retrievable; for_each yields exactly the model.
//
// Property 2: duplicate puts never overwrite.
//  - put(k, v1) then put(k, v2) returns DuplicateKey and get(k) == v1.
use proptest::prelude::*;
use std::collections::BTreeMap;
use symtable::{PutError, SymTable};

proptest! {
    #![proptest_config(ProptestConfig { cases: 24, .. ProptestConfig::default() })]
    #[test]
    fn prop_uniqueness_and_round_trip(
        ops in proptest::collection::vec((0u8..=2u8, 0usize..700usize, any::<u32>()), 1..1500)
    ) {
        let mut t: SymTable<u32> = SymTable::new();
        let mut model: BTreeMap<String, u32> = BTreeMap::new();

        for (op, k, v) in ops {
            let key = format!("k{}", k);
            match op {
                0 => match t.put(&key, v) {
                    Ok(()) => {
                        prop_assert!(model.insert(key.clone(), v).is_none());
                    }
                    Err(PutError::DuplicateKey) => prop_assert!(model.contains_key(&key)),
                    Err(e) => prop_assert!(false, "unexpected {:?}", e),
                },
                1 => {
                    prop_assert_eq!(t.remove(&key), model.remove(&key));
                }
                2 => {
                    let old = t.replace(&key, v);
                    let mold = model.get_mut(&key).map(|m| std::mem::replace(m, v));
                    prop_assert_eq!(old, mold);
                }
                _ => unreachable!(),
            }
            prop_assert_eq!(t.len(), model.len());
        }

        for (k, v) in &model {
            prop_assert_eq!(t.get(k), Some(v));
        }
        let mut seen: BTreeMap<String, u32> = BTreeMap::new();
        t.for_each(|k, v| {
            assert!(seen.insert(k.to_string(), *v).is_none(), "visited {} twice", k);
        });
        prop_assert_eq!(seen, model);
    }
}

proptest! {
    #[test]
    fn prop_duplicate_put_keeps_first(k in "[a-zA-Z_][a-zA-Z0-9_]{0,12}", v1 in any::<i64>(), v2 in any::<i64>()) {
        let mut t: SymTable<i64> = SymTable::new();
        prop_assert_eq!(t.put(&k, v1), Ok(()));
        prop_assert_eq!(t.put(&k, v2), Err(PutError::DuplicateKey));
        prop_assert_eq!(t.get(&k), Some(&v1));
        prop_assert_eq!(t.len(), 1);
    }
}
