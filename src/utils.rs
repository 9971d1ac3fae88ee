use fnv::FnvHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasherDefault, Hash};

pub type FnvBuildHasher = BuildHasherDefault<FnvHasher>;
pub type FnvHashSet<T> = HashSet<T, FnvBuildHasher>;
pub type FnvHashMap<K, V> = HashMap<K, V, FnvBuildHasher>;

/// A hash set sized for `capacity` keys. FNV is quick on small keys like `Point`,
/// but offers no protection against deliberate collisions.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    HashSet::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}

/// The map counterpart of `fnv_hashset`.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}
