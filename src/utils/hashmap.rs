//! The hash-map used throughout this crate.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`].
///
/// Iteration order of this map is unspecified: algorithms that emit results
/// must not depend on it.
pub type HashMap<K, V> = hashbrown::hash_map::HashMap<K, V>;
