//! Iterators over the entries of a hash map.
//!
//! Iteration follows the master chain of the underlying table, so its order
//! is unspecified, but consistent between consecutive calls on an unmodified
//! map.

use super::entry::Entry;
use super::table::raw::{RawIter, RawIterMut};

/// An iterator over the key-value pairs of a map.
pub struct Iter<'a, K, V> {
    inner: RawIter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(inner: RawIter<'a, Entry<K, V>>) -> Self { Iter { inner } }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|node| {
            let entry = node.value();

            (&entry.key, &entry.value)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self { Iter { inner: self.inner.clone() } }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// An iterator over the key-value pairs of a map, with mutable values.
pub struct IterMut<'a, K, V> {
    inner: RawIterMut<'a, Entry<K, V>>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(inner: RawIterMut<'a, Entry<K, V>>) -> Self {
        IterMut { inner }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.inner.next().map(|node| {
            let entry = node.value_mut();

            (&entry.key, &mut entry.value)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

/// An iterator over the keys of a map.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self { Keys { inner } }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> { self.inner.next().map(|(key, _)| key) }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self { Keys { inner: self.inner.clone() } }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

/// An iterator over the values of a map.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self { Values { inner } }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Self { Values { inner: self.inner.clone() } }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

/// An iterator over the values of a map, mutably.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    pub(crate) fn new(inner: IterMut<'a, K, V>) -> Self { ValuesMut { inner } }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {}
