//! Collection types used across tickscope.
//!
//! Re-exports AHash-backed hash collections and the ordered map used for
//! subscriber storage.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

/// Insertion-ordered map hashed with AHash.
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, RandomState>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("key", "value");
        assert_eq!(map.get("key"), Some(&"value"));
    }

    #[test]
    fn test_index_map_keeps_insertion_order_after_removal() {
        let mut map = IndexMap::default();
        map.insert(3, "c");
        map.insert(1, "a");
        map.insert(2, "b");
        map.shift_remove(&1);
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec![3, 2]);
    }
}
