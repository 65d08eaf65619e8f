// ==============================================
// LFU CACHE INVARIANT TESTS (integration)
// ==============================================
//
// Behaviour that spans the builder, the cache and the list primitives,
// exercised through the public API only.

use lfukit::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ==============================================
// Construction
// ==============================================

mod construction {
    use super::*;

    #[test]
    fn signed_capacity_is_validated() {
        assert_eq!(
            LfuCache::<u32, u32>::try_new(-10).unwrap_err(),
            ConfigError::NegativeCapacity(-10)
        );
        let cache = LfuCache::<u32, u32>::try_new(3).unwrap();
        assert_eq!(cache.capacity(), 3);
    }

    #[test]
    fn builder_and_default_agree() {
        let built: LfuCache<u32, u32> = CacheBuilder::default().build();
        let default: LfuCache<u32, u32> = LfuCache::default();
        assert_eq!(built.capacity(), default.capacity());
        assert_eq!(default.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn capacity_zero_is_honored() {
        let mut cache: LfuCache<&str, i32> = CacheBuilder::new(0).build();
        cache.put("key", 42);
        assert_eq!(cache.capacity(), 0);
        assert_eq!(cache.len(), 0, "capacity-0 cache must not store entries");
        assert_eq!(cache.get(&"key"), None);
    }
}

// ==============================================
// Eviction order
// ==============================================

mod eviction_order {
    use super::*;

    #[test]
    fn two_entry_walkthrough() {
        let mut cache = LfuCache::new(2);
        cache.put(1, 1);
        cache.put(2, 2);
        assert_eq!(cache.get(&1), Some(&1));
        cache.put(3, 3);
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&3), Some(&3));
        cache.put(4, 4);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&3), Some(&3));
        assert_eq!(cache.get(&4), Some(&4));
    }

    #[test]
    fn hot_keys_survive_a_scan() {
        let mut cache = LfuCache::new(4);
        for key in 0..2u32 {
            cache.put(key, key);
            for _ in 0..5 {
                cache.get(&key);
            }
        }
        for key in 100..200u32 {
            cache.put(key, key);
        }
        assert!(cache.contains(&0));
        assert!(cache.contains(&1));
        assert_eq!(cache.len(), 4);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn iteration_reflects_frequency_then_recency() {
        let mut cache = LfuCache::new(5);
        for key in ["a", "b", "c", "d"] {
            cache.put(key, key.len());
        }
        cache.get(&"c");
        cache.get(&"c");
        cache.get(&"a");
        cache.get(&"d");

        let order: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
        assert_eq!(order, vec!["c", "d", "a", "b"]);

        let freqs: Vec<_> = order.iter().map(|k| cache.frequency(k)).collect();
        assert_eq!(freqs, vec![Some(3), Some(2), Some(2), Some(1)]);
    }

    #[test]
    fn pop_lfu_matches_peek_lfu() {
        let mut cache = LfuCache::new(8);
        for key in 0..8u32 {
            cache.put(key, key * 2);
            for _ in 0..(key % 3) {
                cache.get(&key);
            }
        }
        while let Some((key, value)) = cache.peek_lfu().map(|(k, v)| (*k, *v)) {
            assert_eq!(cache.pop_lfu(), Some((key, value)));
            cache.check_invariants().unwrap();
        }
        assert!(cache.is_empty());
        assert_eq!(cache.min_frequency(), None);
    }
}

// ==============================================
// Randomized stress
// ==============================================

mod stress {
    use super::*;

    #[test]
    fn random_workload_keeps_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut cache = LfuCache::new(32);

        for _ in 0..5_000 {
            let key = rng.gen_range(0..128u32);
            match rng.gen_range(0..10) {
                0..=5 => {
                    if cache.get(&key).is_none() {
                        cache.put(key, key);
                    }
                },
                6..=8 => cache.put(key, key + 1),
                _ => {
                    cache.pop_lfu();
                },
            }
            assert!(cache.len() <= 32);
        }
        cache.check_invariants().unwrap();

        let mut last = u64::MAX;
        for (key, _) in &cache {
            let freq = cache.frequency(key).unwrap();
            assert!(freq <= last, "iteration must not increase in frequency");
            last = freq;
        }
    }

    #[test]
    fn frequency_never_decreases_while_resident() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut cache = LfuCache::new(16);
        let mut seen = std::collections::HashMap::new();

        for _ in 0..2_000 {
            let key = rng.gen_range(0..24u32);
            cache.put(key, key);
            for (k, _) in cache.iter() {
                let freq = cache.frequency(k).unwrap();
                let prev = seen.insert(*k, freq).unwrap_or(0);
                assert!(freq >= prev, "resident key lost frequency");
            }
            seen.retain(|k, _| cache.contains(k));
        }
    }
}

// ==============================================
// Shared node pool
// ==============================================

mod shared_pool {
    use super::*;

    #[test]
    fn nodes_move_between_lists_by_handle() {
        let mut pool = NodePool::new();
        let mut left = OrderedList::new();
        let mut right = OrderedList::new();

        let a = pool.insert("a");
        let b = pool.insert("b");
        left.push_back(&mut pool, a);
        left.push_back(&mut pool, b);

        left.pop(&mut pool, a);
        right.push_front(&mut pool, a);

        assert!(right.contains(&pool, a));
        assert!(!left.contains(&pool, a));
        assert_ne!(left.tag(), right.tag());
        assert_eq!(left.iter(&pool).map(|(_, v)| *v).collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(right.iter(&pool).map(|(_, v)| *v).collect::<Vec<_>>(), vec!["a"]);
        left.check_invariants(&pool).unwrap();
        right.check_invariants(&pool).unwrap();
    }

    #[test]
    #[should_panic(expected = "still linked")]
    fn pushing_a_linked_node_panics() {
        let mut pool = NodePool::new();
        let mut left = OrderedList::new();
        let mut right = OrderedList::new();
        let a = pool.insert(1);
        left.push_back(&mut pool, a);
        right.push_back(&mut pool, a);
    }

    #[test]
    #[should_panic(expected = "not linked into list")]
    fn foreign_anchor_panics() {
        let mut pool = NodePool::new();
        let mut left = OrderedList::new();
        let mut right = OrderedList::new();
        let anchor = pool.insert(1);
        let node = pool.insert(2);
        left.push_back(&mut pool, anchor);
        right.push_after(&mut pool, anchor, node);
    }
}

// ==============================================
// Trait seam
// ==============================================

mod trait_seam {
    use super::*;

    fn hit_ratio<C: CoreCache<u64, u64>>(cache: &mut C, keys: &[u64]) -> f64 {
        let mut hits = 0usize;
        for &key in keys {
            if cache.get(&key).is_some() {
                hits += 1;
            } else {
                cache.put(key, key);
            }
        }
        hits as f64 / keys.len() as f64
    }

    #[test]
    fn generic_callers_drive_the_cache() {
        let keys: Vec<u64> = (0..100).map(|i| i % 4).collect();
        let mut cache = LfuCache::new(4);
        let ratio = hit_ratio(&mut cache, &keys);
        assert!((ratio - 0.96).abs() < 1e-9);
        assert_eq!(LfuCacheTrait::frequency(&cache, &0), Some(25));
    }
}

// ==============================================
// Metrics export
// ==============================================

#[cfg(feature = "metrics")]
mod metrics_export {
    use lfukit::metrics::PrometheusTextExporter;
    use lfukit::policy::lfu::LfuCache;

    #[test]
    fn snapshot_renders_as_prometheus_text() {
        let mut cache = LfuCache::new(2);
        cache.put(1u32, 1u32);
        cache.put(2, 2);
        cache.get(&1);
        cache.put(3, 3);

        let mut exporter = PrometheusTextExporter::new("lfu", Vec::new());
        exporter.export(&cache.metrics_snapshot()).unwrap();
        let text = String::from_utf8(exporter.into_inner()).unwrap();

        assert!(text.contains("lfu_get_hits_total 1\n"));
        assert!(text.contains("lfu_evicted_entries_total 1\n"));
        assert!(text.contains("lfu_cache_len 2\n"));
        assert!(text.contains("lfu_capacity 2\n"));
    }
}
