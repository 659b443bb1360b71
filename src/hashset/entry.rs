//! The entry of a hash set.

use super::root::fmt;

use super::table::key::Key;

/// Entry
///
/// The element stored by a `HashSet`; the element is its own key.
pub struct Entry<T>(pub T);

impl<T> Key for Entry<T> {
    type Key = T;

    fn key(&self) -> &T { &self.0 }
}

impl<T: fmt::Debug> fmt::Debug for Entry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
