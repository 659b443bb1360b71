//! Iterators over the elements of a hash set.

use super::entry::Entry;
use super::table::raw::RawIter;

/// An iterator over the elements of a set, in unspecified order.
pub struct Iter<'a, T> {
    inner: RawIter<'a, Entry<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(inner: RawIter<'a, Entry<T>>) -> Self { Iter { inner } }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|node| &node.value().0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self { Iter { inner: self.inner.clone() } }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
