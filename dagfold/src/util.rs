use std::hash::{BuildHasher as _, Hash, Hasher};

pub(crate) type BuildHasher = fxhash::FxBuildHasher;

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, BuildHasher>;

pub(crate) fn hash_one<T: Hash + ?Sized>(build: &BuildHasher, value: &T) -> u64 {
    let mut hasher = build.build_hasher();
    value.hash(&mut hasher);
    hasher.finish()
}
