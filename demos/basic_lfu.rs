//! Walks through frequency-based eviction with a two-entry cache.
//!
//! Run with: cargo run --example basic_lfu

use lfukit::builder::CacheBuilder;
use lfukit::policy::lfu::LfuCache;

fn main() {
    let mut cache: LfuCache<&str, String> = CacheBuilder::new(2).build();

    cache.put("a", "alpha".to_string());
    cache.put("b", "beta".to_string());

    cache.get(&"a");
    cache.put("c", "gamma".to_string());

    println!("contains a? {}", cache.contains(&"a"));
    println!("contains b? {}", cache.contains(&"b"));

    for (key, value) in &cache {
        println!("{key} = {value} (frequency {:?})", cache.frequency(key));
    }
}

// Expected output:
// contains a? true
// contains b? false
// a = alpha (frequency Some(2))
// c = gamma (frequency Some(1))
//
// Explanation: capacity=2; "a" is accessed before inserting "c", so "b" is evicted.
