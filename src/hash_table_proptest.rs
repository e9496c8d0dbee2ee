#![cfg(test)]

// Property tests for HashTable, checked against a slot-level model of the
// bucket layout and a hashbrown multimap of per-key entry counts.

use crate::hash::super_fast_hash;
use crate::hash_table::HashTable;
use hashbrown::HashMap;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Get(usize),
    GetAll(usize),
    Remove(usize),
    Mutate(usize, i32),
    Keys,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            1 => idx.clone().prop_map(OpI::Get),
            1 => idx.clone().prop_map(OpI::GetAll),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Keys),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

/// Slot-level model: one `Vec` per bucket, tombstones as `None`, a put
/// fills the first hole or appends.
struct Model {
    buckets: Vec<Vec<Option<(String, i32)>>>,
}

impl Model {
    fn new(bucket_count: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); bucket_count],
        }
    }

    fn bucket_mut(&mut self, key: &str) -> &mut Vec<Option<(String, i32)>> {
        let n = self.buckets.len();
        &mut self.buckets[super_fast_hash(key.as_bytes()) as usize % n]
    }

    fn bucket(&self, key: &str) -> &Vec<Option<(String, i32)>> {
        &self.buckets[super_fast_hash(key.as_bytes()) as usize % self.buckets.len()]
    }

    fn put(&mut self, key: &str, v: i32) {
        let b = self.bucket_mut(key);
        match b.iter_mut().find(|s| s.is_none()) {
            Some(hole) => *hole = Some((key.to_string(), v)),
            None => b.push(Some((key.to_string(), v))),
        }
    }

    fn matches(&self, key: &str) -> Vec<i32> {
        self.bucket(key)
            .iter()
            .flatten()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| *v)
            .collect()
    }

    fn remove(&mut self, key: &str) -> Option<i32> {
        let slot = self
            .bucket_mut(key)
            .iter_mut()
            .find(|s| matches!(s, Some((k, _)) if k == key))?;
        slot.take().map(|(_, v)| v)
    }

    fn first_mut(&mut self, key: &str) -> Option<&mut i32> {
        self.bucket_mut(key)
            .iter_mut()
            .flatten()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    fn keys(&self) -> Vec<String> {
        self.buckets
            .iter()
            .flat_map(|b| b.iter().flatten().map(|(k, _)| k.clone()))
            .collect()
    }
}

// Invariants exercised across random operation sequences:
// - `get` returns the first live match in slot order, `get_all` every match.
// - `remove` takes only the first match and leaves a reusable tombstone.
// - `keys` lists live keys in bucket order; per-key counts match a multimap.
// - `len`/`is_empty` parity with the model after each op.
fn run_scenario(bucket_count: usize, pool: &[String], ops: Vec<OpI>) -> Result<(), TestCaseError> {
    let mut sut: HashTable<i32> = HashTable::new(bucket_count).expect("non-zero buckets");
    let mut model = Model::new(bucket_count);
    let mut counts: HashMap<String, usize> = HashMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = &pool[i];
                let e = sut.put(k, v).expect("put succeeds");
                prop_assert_eq!(e.key(), k.as_str());
                prop_assert_eq!(*e.value(), v);
                model.put(k, v);
                *counts.entry(k.clone()).or_default() += 1;
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k).copied(), model.matches(k).first().copied());
                prop_assert_eq!(sut.contains_key(k), counts.get(k).is_some_and(|c| *c > 0));
            }
            OpI::GetAll(i) => {
                let k = &pool[i];
                let all: Vec<i32> = sut.get_all(k).expect("get_all").iter().map(|v| **v).collect();
                prop_assert_eq!(all.len(), counts.get(k).copied().unwrap_or(0));
                prop_assert_eq!(all, model.matches(k));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let got = sut.remove(k);
                prop_assert_eq!(got, model.remove(k));
                if got.is_some() {
                    *counts.get_mut(k).expect("counted") -= 1;
                }
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k), model.first_mut(k)) {
                    (Some(s), Some(m)) => {
                        *s = s.wrapping_add(d);
                        *m = m.wrapping_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "get_mut presence differs from model"),
                }
            }
            OpI::Keys => {
                let keys: Vec<String> = sut
                    .keys()
                    .expect("keys")
                    .iter()
                    .map(|k| k.to_string())
                    .collect();
                prop_assert_eq!(&keys, &model.keys());
                let mut seen: HashMap<String, usize> = HashMap::new();
                for k in keys {
                    *seen.entry(k).or_default() += 1;
                }
                counts.retain(|_, c| *c > 0);
                prop_assert_eq!(seen, counts.clone());
            }
        }

        let live: usize = counts.values().sum();
        prop_assert_eq!(sut.len(), live);
        prop_assert_eq!(sut.is_empty(), live == 0);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(8, &pool, ops)?;
    }
}

// Property: Same invariants with a single bucket, so every key collides and
// resolution rests entirely on key comparison and slot order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(1, &pool, ops)?;
    }
}
