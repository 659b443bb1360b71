//! Iterators over the elements of a list.

use super::allocator::NodeAllocator;
use super::list::{List, Node};
use super::root::{marker, ptr};

/// An iterator over the elements of a list, front to back.
pub struct Iter<'a, T> {
    current: Option<ptr::NonNull<Node<T>>>,
    remaining: usize,
    _marker: marker::PhantomData<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(head: Option<ptr::NonNull<Node<T>>>, len: usize) -> Self {
        Iter { current: head, remaining: len, _marker: marker::PhantomData }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.current?;

        //  Safety:
        //  -   List nodes are valid for the lifetime of the borrow.
        let node = unsafe { &*node.as_ptr() };

        self.current = node.next;
        self.remaining -= 1;

        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            current: self.current,
            remaining: self.remaining,
            _marker: marker::PhantomData,
        }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a list, front to back.
pub struct IterMut<'a, T> {
    current: Option<ptr::NonNull<Node<T>>>,
    remaining: usize,
    _marker: marker::PhantomData<&'a mut Node<T>>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(head: Option<ptr::NonNull<Node<T>>>, len: usize) -> Self {
        IterMut { current: head, remaining: len, _marker: marker::PhantomData }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let node = self.current?;

        //  Safety:
        //  -   List nodes are valid for the lifetime of the borrow, and each
        //      is yielded exactly once.
        let node = unsafe { &mut *node.as_ptr() };

        self.current = node.next;
        self.remaining -= 1;

        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a list, front to back.
pub struct IntoIter<T, A>
where
    A: NodeAllocator<Node<T>>,
{
    list: List<T, A>,
}

impl<T, A> IntoIter<T, A>
where
    A: NodeAllocator<Node<T>>,
{
    pub(crate) fn new(list: List<T, A>) -> Self { IntoIter { list } }
}

impl<T, A> Iterator for IntoIter<T, A>
where
    A: NodeAllocator<Node<T>>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> { self.list.pop_front() }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, A> ExactSizeIterator for IntoIter<T, A> where A: NodeAllocator<Node<T>> {}
