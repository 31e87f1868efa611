//! Hash collections keyed with the Fx hasher. Keys here are small `Copy`
//! values such as hotkeys, never attacker controlled.

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type HashSet<T> = rustc_hash::FxHashSet<T>;
