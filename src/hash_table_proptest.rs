#![cfg(test)]

// Property tests kept inside the crate so they can check chain placement
// through `SymTable::assert_invariants`.

use crate::hash::KeyHasher;
use crate::{PutError, SymTable, SymTableList, SymbolTable};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations: indices shrink toward earlier keys and op lists
// shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Replace(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Replace(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap:
// - duplicate puts are rejected and keep the first value;
// - replace/remove on absent keys change nothing;
// - get/contains/len agree with the model after every op;
// - for_each visits exactly the model's bindings, each once.
fn run_against_model<T, C>(
    sut: &mut T,
    pool: &[String],
    ops: Vec<OpI>,
    check: C,
) -> Result<(), TestCaseError>
where
    T: SymbolTable<i32>,
    C: Fn(&T),
{
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = &pool[i];
                let already = model.contains_key(k);
                match sut.put(k, v) {
                    Ok(()) => {
                        prop_assert!(!already, "put must fail on duplicate");
                        model.insert(k.clone(), v);
                    }
                    Err(PutError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                    }
                    Err(e) => prop_assert!(false, "unexpected {:?}", e),
                }
            }
            OpI::Replace(i, v) => {
                let k = &pool[i];
                let old = sut.replace(k, v);
                let mold = model.get_mut(k).map(|m| core::mem::replace(m, v));
                prop_assert_eq!(old, mold);
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(!sut.contains(k));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k), model.get_mut(k)) {
                    (Some(v), Some(m)) => {
                        *v = v.saturating_add(d);
                        *m = m.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "get_mut presence differs from model"),
                }
            }
            OpI::Iterate => {
                let mut seen: BTreeMap<String, i32> = BTreeMap::new();
                let mut visits = 0;
                sut.for_each(|k, v| {
                    visits += 1;
                    seen.insert(k.to_string(), *v);
                });
                let expected: BTreeMap<String, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(visits, model.len());
                prop_assert_eq!(seen, expected);
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        check(&*sut);
    }
    Ok(())
}

// Sends every key to bucket 0 to stress chain walking and unlinking.
#[derive(Clone, Copy, Default)]
struct ConstHasher;
impl KeyHasher for ConstHasher {
    fn bucket(&self, _key: &str, _bucket_count: usize) -> usize {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_hash_table_matches_model((pool, ops) in arb_scenario()) {
        let mut sut: SymTable<i32> = SymTable::new();
        run_against_model(&mut sut, &pool, ops, |t| t.assert_invariants())?;
    }

    #[test]
    fn prop_hash_table_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut: SymTable<i32, ConstHasher> = SymTable::with_hasher(ConstHasher);
        run_against_model(&mut sut, &pool, ops, |t| {
            t.assert_invariants();
            assert_eq!(t.chain_lengths()[0], t.len());
        })?;
    }

    #[test]
    fn prop_list_table_matches_model((pool, ops) in arb_scenario()) {
        let mut sut: SymTableList<i32> = SymTableList::new();
        run_against_model(&mut sut, &pool, ops, |_| {})?;
    }
}

// Growth under load: bulk inserts cross at least one capacity boundary, then
// random removals; every survivor stays reachable in its own chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 16, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_keeps_every_binding(
        n in 400usize..2200,
        removals in proptest::collection::vec(any::<prop::sample::Index>(), 0..200),
    ) {
        let mut sut: SymTable<usize> = SymTable::new();
        let mut live: Vec<Option<usize>> = Vec::with_capacity(n);
        for i in 0..n {
            prop_assert_eq!(sut.put(&format!("sym{}", i), i), Ok(()));
            live.push(Some(i));
        }
        let expected_cap = crate::CAPACITY_SCHEDULE
            .iter()
            .copied()
            .find(|&c| c >= n)
            .unwrap();
        prop_assert_eq!(sut.capacity(), expected_cap);

        for r in removals {
            let i = r.index(n);
            let key = format!("sym{}", i);
            prop_assert_eq!(sut.remove(&key), live[i].take());
        }
        sut.assert_invariants();
        prop_assert_eq!(sut.capacity(), expected_cap);
        for (i, v) in live.iter().enumerate() {
            prop_assert_eq!(sut.get(&format!("sym{}", i)), v.as_ref());
        }
        prop_assert_eq!(sut.len(), live.iter().flatten().count());
    }
}
