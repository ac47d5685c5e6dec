use std::hash::Hash;

use fnv::FnvHashMap;

/// An empty FNV keyed map sized for `capacity` entries.
/// FNV beats SipHash on the small integer keys that grid positions are made of.
pub(crate) fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    FnvHashMap::with_capacity_and_hasher(capacity, Default::default())
}
