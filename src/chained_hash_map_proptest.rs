#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can check
// the internal chain layout after every operation.

use crate::chained_hash_map::ChainedHashMap;
use crate::config::TableConfig;
use crate::error::PutError;
use core::hash::{BuildHasher, Hasher};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::hash_map::RandomState;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations: `None` addresses the sentinel key, `Some(i)` the
// i-th string of the pool. Indices shrink toward earlier keys.
#[derive(Clone, Debug)]
enum Op {
    Put(Option<usize>, i32),
    TryPut(Option<usize>, Option<i32>),
    Remove(Option<usize>),
    Get(Option<usize>),
    Mutate(Option<usize>, i32),
    ContainsValue(i32),
    Views,
    Clear,
}

fn key_from(pool: &[String], i: Option<usize>) -> Option<String> {
    i.map(|i| pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=10).prop_flat_map(|pool| {
        let len = pool.len();
        // The extra index past the pool stands for the sentinel key.
        let idx = move || (0..=len).prop_map(move |i| if i < len { Some(i) } else { None });
        let small = -8i32..8;
        let op = prop_oneof![
            8 => (idx(), small.clone()).prop_map(|(i, v)| Op::Put(i, v)),
            2 => (idx(), proptest::option::of(small.clone()))
                .prop_map(|(i, v)| Op::TryPut(i, v)),
            4 => idx().prop_map(Op::Remove),
            3 => idx().prop_map(Op::Get),
            2 => (idx(), small.clone()).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => small.clone().prop_map(Op::ContainsValue),
            1 => Just(Op::Views),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap. After every
// operation the chain layout must satisfy the structural invariants and the
// observable contents must equal the model.
fn run_scenario<S: BuildHasher>(
    mut sut: ChainedHashMap<String, i32, S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Option<String>, i32> = HashMap::new();
    let initial_capacity = sut.capacity();

    for op in ops {
        match op {
            Op::Put(i, v) => {
                let k = key_from(pool, i);
                let expected = model.insert(k.clone(), v);
                prop_assert_eq!(sut.put(k, v), expected);
            }
            Op::TryPut(i, v) => {
                let k = key_from(pool, i);
                match v {
                    Some(v) => {
                        let expected = model.insert(k.clone(), v);
                        prop_assert_eq!(sut.try_put(k, Some(v)), Ok(expected));
                    }
                    None => {
                        prop_assert_eq!(sut.try_put(k, None), Err(PutError::AbsentValue));
                    }
                }
            }
            Op::Remove(i) => {
                let k = key_from(pool, i);
                let before = sut.len();
                let expected = model.remove(&k);
                prop_assert_eq!(sut.remove(k.as_ref()), expected);
                let shrink = usize::from(expected.is_some());
                prop_assert_eq!(sut.len(), before - shrink);
                prop_assert!(sut.get(k.as_ref()).is_none());
            }
            Op::Get(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.get(k.as_ref()), model.get(&k));
                prop_assert_eq!(sut.contains_key(k.as_ref()), model.contains_key(&k));
            }
            Op::Mutate(i, d) => {
                let k = key_from(pool, i);
                match (sut.get_mut(k.as_ref()), model.get_mut(&k)) {
                    (Some(s), Some(m)) => {
                        *s = s.saturating_add(d);
                        *m = m.saturating_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m),
                }
            }
            Op::ContainsValue(v) => {
                prop_assert_eq!(sut.contains_value(&v), model.values().any(|m| *m == v));
            }
            Op::Views => {
                let keys: BTreeSet<_> = sut.key_set().into_iter().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(keys, m_keys);

                let mut values = sut.values();
                let mut m_values: Vec<_> = model.values().copied().collect();
                values.sort_unstable();
                m_values.sort_unstable();
                prop_assert_eq!(values, m_values);

                prop_assert_eq!(sut.entry_set().len(), model.len());
            }
            Op::Clear => {
                let capacity = sut.capacity();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), capacity);
            }
        }

        sut.assert_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // Capacity is the initial one doubled zero or more times.
        prop_assert_eq!(sut.capacity() % initial_capacity, 0);
        prop_assert!((sut.capacity() / initial_capacity).is_power_of_two());
    }

    let contents: HashMap<Option<String>, i32> =
        sut.iter().map(|(k, v)| (k.cloned(), *v)).collect();
    prop_assert_eq!(contents, model);
    Ok(())
}

fn small_table<S>(hasher: S) -> ChainedHashMap<String, i32, S> {
    // Small start so that growth happens within a scenario.
    ChainedHashMap::with_config_and_hasher(
        TableConfig::new().initial_capacity(2).load_factor(0.75),
        hasher,
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(small_table(RandomState::new()), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_default_table((pool, ops) in arb_scenario()) {
        run_scenario(ChainedHashMap::new(), &pool, ops)?;
    }
}

// Collision variant using a constant hasher. Every key mixes to hash 0, so
// every entry shares bucket 0 with the sentinel key and lookups rely on
// equality alone.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(small_table(ConstBuildHasher), &pool, ops)?;
    }
}

// Growth fires exactly when a new key brings len to the threshold.
proptest! {
    #[test]
    fn prop_growth_schedule(capacity in 1usize..64, lf_percent in 1u32..=100, n in 0usize..300) {
        let load_factor = lf_percent as f64 / 100.0;
        let config = TableConfig::new().initial_capacity(capacity).load_factor(load_factor);
        let mut m: ChainedHashMap<usize, usize> = ChainedHashMap::with_config(config).unwrap();

        let mut expected_capacity = capacity;
        for k in 0..n {
            m.put(Some(k), k);
            if k + 1 == crate::config::growth_threshold(expected_capacity, load_factor) {
                expected_capacity *= 2;
            }
            prop_assert_eq!(m.capacity(), expected_capacity);
        }
        prop_assert_eq!(m.len(), n);
        if config.growth_threshold() == 0 {
            prop_assert_eq!(m.capacity(), capacity);
        }
        m.assert_invariants();
    }
}
