use indexmap::IndexMap;
use rustc_hash::FxHashMap;

pub type FastHashMap<K, V> = FxHashMap<K, V>;
pub type FastIndexMap<K, V> = IndexMap<K, V, rustc_hash::FxBuildHasher>;
