/// Keys identifying render targets across passes.
#[cfg(feature = "std")]
pub trait ItemKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq + Clone> ItemKey for T {}

#[cfg(not(feature = "std"))]
pub trait ItemKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<T: Ord + Clone> ItemKey for T {}

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = std::collections::HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = alloc::collections::BTreeMap<K, V>;

#[cfg(feature = "std")]
pub(crate) type KeySet<K> = std::collections::HashSet<K>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySet<K> = alloc::collections::BTreeSet<K>;
