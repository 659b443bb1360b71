//! The key-value entry of a hash map.

use super::root::fmt;

use super::table::key::Key;

/// Entry
///
/// The element stored by a `HashMap`: a key and its associated value.
pub struct Entry<K, V> {
    /// The key; never modified while stored.
    pub key: K,
    /// The value.
    pub value: V,
}

impl<K, V> Key for Entry<K, V> {
    type Key = K;

    fn key(&self) -> &K { &self.key }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {:?}", self.key, self.value)
    }
}
