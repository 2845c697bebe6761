// ==============================================
// MODEL-BASED POLICY TESTS (integration)
// ==============================================
//
// Drives each cache with random operation sequences and compares every
// observable result against a straightforward reference model.

use std::collections::BTreeMap;

use lrukit::policy::lru::LruCache;
use lrukit::policy::lru_k::LrukCache;
use lrukit::traits::{CoreCache, LruCacheTrait, LrukCacheTrait, MutableCache};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Put(u8, u16),
    Get(u8),
    Remove(u8),
    Touch(u8),
    Contains(u8),
}

fn op_strategy(universe: u8) -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..universe, any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
        3 => (0..universe).prop_map(Op::Get),
        1 => (0..universe).prop_map(Op::Remove),
        1 => (0..universe).prop_map(Op::Touch),
        1 => (0..universe).prop_map(Op::Contains),
    ]
}

// ==============================================
// LRU-K reference model
// ==============================================
//
// Linear scan over every entry to find the victim: smallest oldest tick among
// entries with K recorded ticks, ties broken by key.

struct LrukModel {
    entries: BTreeMap<u8, (u16, Vec<u64>)>,
    capacity: usize,
    k: usize,
    now: u64,
}

impl LrukModel {
    fn new(capacity: usize, k: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity,
            k,
            now: 0,
        }
    }

    fn access(&mut self, key: u8) {
        self.now += 1;
        let k = self.k;
        let (_, history) = self.entries.get_mut(&key).unwrap();
        history.push(self.now);
        if history.len() > k {
            history.remove(0);
        }
    }

    fn victim(&self) -> Option<u8> {
        self.entries
            .iter()
            .filter(|(_, (_, history))| history.len() == self.k)
            .min_by_key(|(key, (_, history))| (history[0], **key))
            .map(|(key, _)| *key)
    }

    fn put(&mut self, key: u8, value: u16) -> Option<u16> {
        if let Some((old, _)) = self.entries.get(&key).cloned() {
            self.access(key);
            self.entries.get_mut(&key).unwrap().0 = value;
            return Some(old);
        }
        if self.entries.len() >= self.capacity {
            if let Some(victim) = self.victim() {
                self.entries.remove(&victim);
            }
        }
        self.entries.insert(key, (value, Vec::new()));
        self.access(key);
        None
    }

    fn get(&mut self, key: u8) -> Option<u16> {
        if self.entries.contains_key(&key) {
            self.access(key);
        }
        self.entries.get(&key).map(|(value, _)| *value)
    }

    fn touch(&mut self, key: u8) -> bool {
        if self.entries.contains_key(&key) {
            self.access(key);
            true
        } else {
            false
        }
    }

    fn remove(&mut self, key: u8) -> bool {
        self.entries.remove(&key).is_some()
    }
}

// ==============================================
// LRU reference model
// ==============================================

struct LruModel {
    // front = most recently used
    order: Vec<(u8, u16)>,
    capacity: usize,
}

impl LruModel {
    fn position(&self, key: u8) -> Option<usize> {
        self.order.iter().position(|(k, _)| *k == key)
    }

    fn promote(&mut self, key: u8) -> Option<u16> {
        let idx = self.position(key)?;
        let entry = self.order.remove(idx);
        self.order.insert(0, entry);
        Some(entry.1)
    }

    fn put(&mut self, key: u8, value: u16) -> Option<u16> {
        if let Some(old) = self.promote(key) {
            self.order[0].1 = value;
            return Some(old);
        }
        if self.order.len() >= self.capacity {
            self.order.pop();
        }
        self.order.insert(0, (key, value));
        None
    }

    fn remove(&mut self, key: u8) -> bool {
        match self.position(key) {
            Some(idx) => {
                self.order.remove(idx);
                true
            },
            None => false,
        }
    }
}

mod lru_k_against_model {
    use super::*;

    proptest! {
        /// Property: every operation agrees with the reference model
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_model(
            capacity in 1usize..8,
            k in 1usize..4,
            ops in prop::collection::vec(op_strategy(12), 0..200)
        ) {
            let mut cache = LrukCache::with_k(capacity, k);
            let mut model = LrukModel::new(capacity, k);

            for op in ops {
                match op {
                    Op::Put(key, value) => {
                        prop_assert_eq!(cache.put(key, value), model.put(key, value));
                    },
                    Op::Get(key) => {
                        prop_assert_eq!(cache.get(&key).copied(), model.get(key));
                    },
                    Op::Remove(key) => {
                        prop_assert_eq!(cache.remove(&key), model.remove(key));
                    },
                    Op::Touch(key) => {
                        prop_assert_eq!(cache.touch(&key), model.touch(key));
                    },
                    Op::Contains(key) => {
                        prop_assert_eq!(cache.contains(&key), model.entries.contains_key(&key));
                    },
                }

                prop_assert_eq!(cache.len(), model.entries.len());
                prop_assert_eq!(cache.now(), model.now);
                prop_assert_eq!(cache.peek_lru_k().map(|(key, _)| *key), model.victim());
                prop_assert!(cache.check_invariants().is_ok());
            }

            for (key, (_, history)) in &model.entries {
                let mut mru: Vec<u64> = history.clone();
                mru.reverse();
                prop_assert_eq!(cache.access_history(key), Some(mru));
            }
        }

        /// Property: len stays within capacity when an evictable entry exists at overflow
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_len_bounded_with_k_one(
            capacity in 1usize..16,
            keys in prop::collection::vec(0u16..64, 0..300)
        ) {
            let mut cache = LrukCache::with_k(capacity, 1);
            for key in keys {
                cache.put(key, ());
                prop_assert!(cache.len() <= capacity);
            }
        }

        /// Property: contains never changes later results
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_contains_is_pure(
            ops in prop::collection::vec(op_strategy(8), 0..100),
            probes in prop::collection::vec(0u8..8, 0..20)
        ) {
            let mut plain = LrukCache::with_k(4, 2);
            let mut probed = LrukCache::with_k(4, 2);

            for op in &ops {
                for cache in [&mut plain, &mut probed] {
                    match *op {
                        Op::Put(key, value) => { cache.put(key, value); },
                        Op::Get(key) => { cache.get(&key); },
                        Op::Remove(key) => { cache.remove(&key); },
                        Op::Touch(key) => { cache.touch(&key); },
                        Op::Contains(_) => {},
                    }
                }
                for probe in &probes {
                    let _ = probed.contains(probe);
                }
            }

            for key in 0u8..8 {
                prop_assert_eq!(plain.access_history(&key), probed.access_history(&key));
                prop_assert_eq!(plain.get(&key), probed.get(&key));
            }
        }

        /// Property: put then get round-trips when the key was not evicted
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_put_get_round_trip(
            ops in prop::collection::vec(op_strategy(10), 0..100),
            key in 0u8..10,
            value in any::<u16>()
        ) {
            let mut cache = LrukCache::with_k(3, 2);
            for op in ops {
                if let Op::Put(k, v) = op {
                    cache.put(k, v);
                }
            }
            cache.put(key, value);
            prop_assert_eq!(cache.get(&key), Some(&value));

            prop_assert!(cache.remove(&key));
            prop_assert_eq!(cache.get(&key), None);
            prop_assert!(!cache.remove(&key));
        }
    }
}

mod lru_against_model {
    use super::*;

    proptest! {
        /// Property: every operation agrees with the reference model
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_model(
            capacity in 1usize..8,
            ops in prop::collection::vec(op_strategy(12), 0..200)
        ) {
            let mut cache = LruCache::new(capacity);
            let mut model = LruModel { order: Vec::new(), capacity };

            for op in ops {
                match op {
                    Op::Put(key, value) => {
                        prop_assert_eq!(cache.put(key, value), model.put(key, value));
                    },
                    Op::Get(key) => {
                        prop_assert_eq!(cache.get(&key).copied(), model.promote(key));
                    },
                    Op::Remove(key) => {
                        prop_assert_eq!(cache.remove(&key), model.remove(key));
                    },
                    Op::Touch(key) => {
                        prop_assert_eq!(cache.touch(&key), model.promote(key).is_some());
                    },
                    Op::Contains(key) => {
                        prop_assert_eq!(cache.contains(&key), model.position(key).is_some());
                    },
                }

                prop_assert!(cache.len() <= capacity);
                let actual: Vec<(u8, u16)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(&actual, &model.order);
                prop_assert!(cache.check_invariants().is_ok());
            }
        }

        /// Property: K = 1 LRU-K evicts the same keys as LRU
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_k_one_matches_lru(
            capacity in 1usize..8,
            ops in prop::collection::vec(op_strategy(12), 0..200)
        ) {
            let mut lru = LruCache::new(capacity);
            let mut lru_k = LrukCache::with_k(capacity, 1);

            for op in ops {
                match op {
                    Op::Put(key, value) => {
                        prop_assert_eq!(lru.put(key, value), lru_k.put(key, value));
                    },
                    Op::Get(key) => {
                        prop_assert_eq!(lru.get(&key).copied(), lru_k.get(&key).copied());
                    },
                    Op::Remove(key) => {
                        prop_assert_eq!(lru.remove(&key), lru_k.remove(&key));
                    },
                    Op::Touch(key) => {
                        prop_assert_eq!(LruCacheTrait::touch(&mut lru, &key), LrukCacheTrait::touch(&mut lru_k, &key));
                    },
                    Op::Contains(key) => {
                        prop_assert_eq!(lru.contains(&key), lru_k.contains(&key));
                    },
                }
                prop_assert_eq!(
                    lru.peek_lru().map(|(key, _)| *key),
                    lru_k.peek_lru_k().map(|(key, _)| *key)
                );
            }
        }
    }
}
