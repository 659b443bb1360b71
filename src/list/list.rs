//! The list itself.

use super::root::{fmt, hint, mem, ptr};

use super::allocator::NodeAllocator;
use super::exchange::{self, InPlacePort, Port};
use super::failure::{Failure, Result};
use super::iterator::{IntoIter, Iter, IterMut};

#[cfg(feature = "with-std")]
use super::allocator::HeapAllocator;

/// The storage cell of a list: a forward link and the payload.
pub struct Node<T> {
    pub(crate) next: Option<ptr::NonNull<Node<T>>>,
    pub(crate) value: T,
}

/// List
///
/// A singly-linked list drawing its nodes from a `NodeAllocator`.
///
/// #   Example
///
/// ```
/// use corral::list::List;
///
/// let mut list: List<i32> = List::new();
///
/// list.push_back(1);
/// list.push_back(2);
/// list.push_front(0);
///
/// assert_eq!(vec![0, 1, 2], list.iter().copied().collect::<Vec<_>>());
/// assert_eq!(Some(0), list.pop_front());
/// ```
#[cfg(feature = "with-std")]
pub struct List<T, A = HeapAllocator<Node<T>>>
where
    A: NodeAllocator<Node<T>>,
{
    head: Option<ptr::NonNull<Node<T>>>,
    tail: Option<ptr::NonNull<Node<T>>>,
    len: usize,
    allocator: A,
}

/// List
///
/// A singly-linked list drawing its nodes from a `NodeAllocator`.
#[cfg(not(feature = "with-std"))]
pub struct List<T, A>
where
    A: NodeAllocator<Node<T>>,
{
    head: Option<ptr::NonNull<Node<T>>>,
    tail: Option<ptr::NonNull<Node<T>>>,
    len: usize,
    allocator: A,
}

impl<T, A> List<T, A>
where
    A: NodeAllocator<Node<T>> + Default,
{
    /// Creates an empty list with a default allocator.
    pub fn new() -> Self { Self::with_allocator(A::default()) }
}

impl<T, A> List<T, A>
where
    A: NodeAllocator<Node<T>>,
{
    /// Creates an empty list over `allocator`.
    ///
    /// #   Example
    ///
    /// ```
    /// use corral::arena::Arena;
    /// use corral::list::{List, Node};
    ///
    /// let arena: Arena<Node<i32>, 4> = Arena::new();
    /// let mut list = List::with_allocator(&arena);
    ///
    /// list.push_back(1);
    ///
    /// assert_eq!(1, list.len());
    /// assert_eq!(4, list.max_len());
    /// ```
    pub fn with_allocator(allocator: A) -> Self {
        List { head: None, tail: None, len: 0, allocator }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize { self.len }

    /// Returns whether the list holds no element.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns the maximum number of elements the backing storage can hold.
    pub fn max_len(&self) -> usize { self.allocator.max_size() }

    /// Returns the allocator.
    pub fn allocator(&self) -> &A { &self.allocator }

    /// Returns a reference to the first element, if any.
    pub fn front(&self) -> Option<&T> {
        //  Safety:
        //  -   List nodes are valid.
        self.head.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns a mutable reference to the first element, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        //  Safety:
        //  -   List nodes are valid.
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Returns a reference to the last element, if any.
    pub fn back(&self) -> Option<&T> {
        //  Safety:
        //  -   List nodes are valid.
        self.tail.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns a mutable reference to the last element, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        //  Safety:
        //  -   List nodes are valid.
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Returns an iterator over the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T> { Iter::new(self.head, self.len) }

    /// Returns a mutable iterator over the elements, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> { IterMut::new(self.head, self.len) }

    /// Prepends an element.
    ///
    /// #   Errors
    ///
    /// Returns `OutOfMemory`, leaving the list untouched, if the backing
    /// storage is exhausted.
    pub fn try_push_front(&mut self, value: T) -> Result<()> {
        let node = self.new_node(value)?;

        //  Safety:
        //  -   `node` is fresh, hence unlinked.
        unsafe { self.link_after(None, node) };

        Ok(())
    }

    /// Prepends an element.
    ///
    /// #   Panics
    ///
    /// Panics if the backing storage is exhausted.
    pub fn push_front(&mut self, value: T) {
        self.try_push_front(value)
            .unwrap_or_else(|failure| panic_from_failure(failure))
    }

    /// Appends an element.
    ///
    /// #   Errors
    ///
    /// Returns `OutOfMemory`, leaving the list untouched, if the backing
    /// storage is exhausted.
    pub fn try_push_back(&mut self, value: T) -> Result<()> {
        let node = self.new_node(value)?;

        //  Safety:
        //  -   `node` is fresh; linking after the tail appends.
        unsafe { self.link_after(self.tail, node) };

        Ok(())
    }

    /// Appends an element.
    ///
    /// #   Panics
    ///
    /// Panics if the backing storage is exhausted.
    pub fn push_back(&mut self, value: T) {
        self.try_push_back(value)
            .unwrap_or_else(|failure| panic_from_failure(failure))
    }

    /// Removes and returns the first element, if any.
    pub fn pop_front(&mut self) -> Option<T> {
        self.head?;

        //  Safety:
        //  -   The list is non-empty, so a head node exists.
        let node = unsafe { self.unlink_after(None) };

        //  Safety:
        //  -   `node` came off this list, its slot allocated by this list's
        //      allocator.
        unsafe {
            let element = self.allocator.destroy(node);
            self.allocator.deallocate(node);

            Some(element.value)
        }
    }

    /// Removes, destroys, and releases every element.
    pub fn clear(&mut self) {
        //  The list is emptied before any destructor runs, so a panicking
        //  destructor cannot leave it observing destroyed nodes.
        let mut current = self.head.take();

        self.tail = None;
        self.len = 0;

        while let Some(node) = current {
            //  Safety:
            //  -   `node` came off this list, its slot allocated by this
            //      list's allocator.
            unsafe {
                current = (*node.as_ptr()).next;

                let element = self.allocator.destroy(node);
                self.allocator.deallocate(node);
                drop(element);
            }
        }
    }

    /// Exchanges the contents of the two lists.
    ///
    /// O(1) when the backing storages are one and the same; otherwise
    /// payloads are exchanged pairwise in place, then the longer side's
    /// remainder moves across.
    ///
    /// #   Errors
    ///
    /// Returns `ExceedsCapacity`, leaving both lists untouched, if either
    /// side's content does not fit the other side's storage.
    pub fn try_swap(&mut self, other: &mut Self) -> Result<()> {
        if self.allocator.handle() == other.allocator.handle() {
            //  Same backing storage: node ownership transfers wholesale.
            mem::swap(self, other);

            return Ok(());
        }

        self.try_swap_with(other)
    }

    /// Exchanges the contents of the two lists.
    ///
    /// #   Panics
    ///
    /// Panics if either side's content does not fit the other side's
    /// storage.
    pub fn swap(&mut self, other: &mut Self) {
        self.try_swap(other)
            .unwrap_or_else(|failure| panic_from_failure(failure))
    }

    /// Exchanges the contents of two lists over arbitrary allocator types,
    /// element by element, preserving the order of both sides.
    ///
    /// Neither storage is ever asked to hold more than its capacity, even
    /// transiently.
    ///
    /// #   Example
    ///
    /// ```
    /// use corral::arena::Arena;
    /// use corral::list::{List, Node};
    ///
    /// let left_arena: Arena<Node<i32>, 4> = Arena::new();
    /// let right_arena: Arena<Node<i32>, 2> = Arena::new();
    ///
    /// let mut left = List::with_allocator(&left_arena);
    /// let mut right = List::with_allocator(&right_arena);
    ///
    /// left.extend([1, 2]);
    /// right.extend([8, 9]);
    ///
    /// left.try_swap_with(&mut right).expect("both sides fit");
    ///
    /// assert_eq!(vec![8, 9], left.iter().copied().collect::<Vec<_>>());
    /// assert_eq!(vec![1, 2], right.iter().copied().collect::<Vec<_>>());
    /// ```
    ///
    /// #   Errors
    ///
    /// Returns `ExceedsCapacity`, leaving both lists untouched, if either
    /// side's content does not fit the other side's storage.
    pub fn try_swap_with<A2>(&mut self, other: &mut List<T, A2>) -> Result<()>
    where
        A2: NodeAllocator<Node<T>>,
    {
        let mut left = ListPort::new(self);
        let mut right = ListPort::new(other);

        exchange::exchange_in_place(&mut left, &mut right)
    }

    //  Allocates and constructs an unlinked node.
    fn new_node(&mut self, value: T) -> Result<ptr::NonNull<Node<T>>> {
        let Some(slot) = self.allocator.allocate() else {
            return Err(Failure::OutOfMemory);
        };

        //  Safety:
        //  -   `slot` is freshly allocated by this list's allocator.
        unsafe { self.allocator.construct(slot, Node { next: None, value }) };

        Ok(slot)
    }

    //  Links `node` after `previous`, or at the head if `previous` is None.
    //
    //  #   Safety
    //
    //  -   Assumes that `node` is valid and unlinked, and `previous`, if
    //      any, is linked in this list.
    unsafe fn link_after(
        &mut self,
        previous: Option<ptr::NonNull<Node<T>>>,
        node: ptr::NonNull<Node<T>>,
    ) {
        match previous {
            None => {
                //  Safety:
                //  -   `node` is valid for writes.
                unsafe { (*node.as_ptr()).next = self.head };

                if self.head.is_none() {
                    self.tail = Some(node);
                }

                self.head = Some(node);
            }
            Some(previous) => {
                //  Safety:
                //  -   `previous` is linked, hence valid; `node` is valid
                //      for writes.
                let successor = unsafe {
                    let successor = (*previous.as_ptr()).next;
                    (*node.as_ptr()).next = successor;
                    (*previous.as_ptr()).next = Some(node);
                    successor
                };

                if successor.is_none() {
                    self.tail = Some(node);
                }
            }
        }

        self.len += 1;
    }

    //  Unlinks and returns the node after `previous`, or the head if
    //  `previous` is None.
    //
    //  #   Safety
    //
    //  -   Assumes that such a node exists, and `previous`, if any, is
    //      linked in this list.
    unsafe fn unlink_after(
        &mut self,
        previous: Option<ptr::NonNull<Node<T>>>,
    ) -> ptr::NonNull<Node<T>> {
        let node = match previous {
            None => self.head,
            //  Safety:
            //  -   `previous` is linked, hence valid.
            Some(previous) => unsafe { (*previous.as_ptr()).next },
        };

        let Some(node) = node else {
            debug_assert!(false, "no node to unlink");

            //  Safety:
            //  -   Unreachable per this function's contract.
            unsafe { hint::unreachable_unchecked() }
        };

        //  Safety:
        //  -   `node` is linked, hence valid.
        let successor = unsafe { (*node.as_ptr()).next };

        match previous {
            None => self.head = successor,
            //  Safety:
            //  -   `previous` is linked, hence valid.
            Some(previous) => unsafe { (*previous.as_ptr()).next = successor },
        }

        if successor.is_none() {
            self.tail = previous;
        }

        //  Safety:
        //  -   `node` is valid; clearing the stale link keeps it inert.
        unsafe { (*node.as_ptr()).next = None };

        self.len -= 1;

        node
    }
}

impl<T, A> Drop for List<T, A>
where
    A: NodeAllocator<Node<T>>,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, A> Default for List<T, A>
where
    A: NodeAllocator<Node<T>> + Default,
{
    fn default() -> Self { Self::new() }
}

impl<T, A> fmt::Debug for List<T, A>
where
    T: fmt::Debug,
    A: NodeAllocator<Node<T>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, A> Extend<T> for List<T, A>
where
    A: NodeAllocator<Node<T>>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

#[cfg(feature = "with-std")]
impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T, A, A2> PartialEq<List<T, A2>> for List<T, A>
where
    T: PartialEq,
    A: NodeAllocator<Node<T>>,
    A2: NodeAllocator<Node<T>>,
{
    fn eq(&self, other: &List<T, A2>) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T, A> Eq for List<T, A>
where
    T: Eq,
    A: NodeAllocator<Node<T>>,
{
}

impl<'a, T, A> IntoIterator for &'a List<T, A>
where
    A: NodeAllocator<Node<T>>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<'a, T, A> IntoIterator for &'a mut List<T, A>
where
    A: NodeAllocator<Node<T>>,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> { self.iter_mut() }
}

impl<T, A> IntoIterator for List<T, A>
where
    A: NodeAllocator<Node<T>>,
{
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> { IntoIter::new(self) }
}

//  One side of a list exchange: a cursor between the elements already
//  processed and the original elements remaining.
pub(crate) struct ListPort<'a, T, A>
where
    A: NodeAllocator<Node<T>>,
{
    list: &'a mut List<T, A>,
    //  The node before the next original element; None while at the head.
    previous: Option<ptr::NonNull<Node<T>>>,
}

impl<'a, T, A> ListPort<'a, T, A>
where
    A: NodeAllocator<Node<T>>,
{
    pub(crate) fn new(list: &'a mut List<T, A>) -> Self {
        ListPort { list, previous: None }
    }

    fn cursor(&self) -> Option<ptr::NonNull<Node<T>>> {
        match self.previous {
            None => self.list.head,
            //  Safety:
            //  -   `previous` is linked, hence valid.
            Some(previous) => unsafe { (*previous.as_ptr()).next },
        }
    }
}

impl<'a, T, A> Port for ListPort<'a, T, A>
where
    A: NodeAllocator<Node<T>>,
{
    type Value = T;

    fn len(&self) -> usize { self.list.len }

    fn free_slots(&self) -> usize { self.list.allocator.reserve() }

    fn max_len(&self) -> usize { self.list.allocator.max_size() }

    fn take_next(&mut self) -> T {
        //  Safety:
        //  -   An original element remains, per the `Port` contract.
        let node = unsafe { self.list.unlink_after(self.previous) };

        //  Safety:
        //  -   `node` came off this list, its slot allocated by this list's
        //      allocator.
        unsafe {
            let element = self.list.allocator.destroy(node);
            self.list.allocator.deallocate(node);

            element.value
        }
    }

    fn put_taken(&mut self, value: T) {
        let Ok(node) = self.list.new_node(value) else {
            debug_assert!(false, "exchange admitted more elements than capacity");

            return;
        };

        //  Received elements land before the remaining originals, in
        //  reception order.
        //
        //  Safety:
        //  -   `node` is fresh; `previous`, if any, is linked.
        unsafe { self.list.link_after(self.previous, node) };

        self.previous = Some(node);
    }

    fn put_first(&mut self, value: T) {
        let Ok(node) = self.list.new_node(value) else {
            debug_assert!(false, "exchange admitted more elements than capacity");

            return;
        };

        //  The pivot lands ahead of everything; final operation of an
        //  exchange, so the cursor no longer matters.
        //
        //  Safety:
        //  -   `node` is fresh.
        unsafe { self.list.link_after(None, node) };
    }
}

impl<'a, T, A> InPlacePort for ListPort<'a, T, A>
where
    A: NodeAllocator<Node<T>>,
{
    fn peek_next(&mut self) -> &mut T {
        let Some(node) = self.cursor() else {
            debug_assert!(false, "no original element to peek at");

            //  Safety:
            //  -   Unreachable per the `InPlacePort` contract.
            unsafe { hint::unreachable_unchecked() }
        };

        //  Safety:
        //  -   `node` is linked, hence valid.
        unsafe { &mut (*node.as_ptr()).value }
    }

    fn advance(&mut self) {
        debug_assert!(self.cursor().is_some());

        self.previous = self.cursor();
    }
}

#[cold]
#[inline(never)]
fn panic_from_failure(failure: Failure) -> ! {
    panic!("{}", failure)
}

#[cfg(test)]
mod tests {

use super::*;

use super::super::super::arena::Arena;

#[test]
fn push_pop_order() {
    let mut list: List<i32> = List::new();

    list.push_back(1);
    list.push_back(2);
    list.push_front(0);

    assert_eq!(3, list.len());
    assert_eq!(vec![0, 1, 2], list.iter().copied().collect::<Vec<_>>());

    assert_eq!(Some(0), list.pop_front());
    assert_eq!(Some(1), list.pop_front());
    assert_eq!(Some(2), list.pop_front());
    assert_eq!(None, list.pop_front());
}

#[test]
fn front_and_back() {
    let mut list: List<i32> = List::new();

    assert_eq!(None, list.front());
    assert_eq!(None, list.back());

    list.push_back(1);
    list.push_back(2);

    assert_eq!(Some(&1), list.front());
    assert_eq!(Some(&2), list.back());

    *list.front_mut().unwrap() = 10;
    *list.back_mut().unwrap() = 20;

    assert_eq!(vec![10, 20], list.iter().copied().collect::<Vec<_>>());
}

#[test]
fn out_of_memory_leaves_list_intact() {
    let arena: Arena<Node<i32>, 2> = Arena::new();
    let mut list = List::with_allocator(&arena);

    list.push_back(1);
    list.push_back(2);

    assert_eq!(Err(Failure::OutOfMemory), list.try_push_back(3));
    assert_eq!(Err(Failure::OutOfMemory), list.try_push_front(0));

    assert_eq!(2, list.len());
    assert_eq!(vec![1, 2], list.iter().copied().collect::<Vec<_>>());
}

#[test]
fn clear_releases_slots() {
    use crate::allocator::NodeAllocator;

    let arena: Arena<Node<i32>, 4> = Arena::new();
    let mut list = List::with_allocator(&arena);

    list.extend([1, 2, 3]);
    assert_eq!(1, arena.reserve());

    list.clear();

    assert!(list.is_empty());
    assert_eq!(4, arena.reserve());

    list.push_back(4);
    assert_eq!(Some(&4), list.front());
}

#[test]
fn iter_mut_updates_in_place() {
    let mut list: List<i32> = [1, 2, 3].into_iter().collect();

    for value in list.iter_mut() {
        *value *= 10;
    }

    assert_eq!(vec![10, 20, 30], list.into_iter().collect::<Vec<_>>());
}

#[test]
fn swap_same_storage() {
    let mut left: List<i32> = [1, 2].into_iter().collect();
    let mut right: List<i32> = [3, 4, 5].into_iter().collect();

    left.swap(&mut right);

    assert_eq!(vec![3, 4, 5], left.iter().copied().collect::<Vec<_>>());
    assert_eq!(vec![1, 2], right.iter().copied().collect::<Vec<_>>());
}

#[test]
fn swap_between_full_arenas_leaves_nodes_in_place() {
    let left_arena: Arena<Node<i32>, 4> = Arena::new();
    let right_arena: Arena<Node<i32>, 4> = Arena::new();

    let mut left = List::with_allocator(&left_arena);
    let mut right = List::with_allocator(&right_arena);

    left.extend([1, 2, 3, 4]);
    right.extend([5, 6, 7, 8]);

    let left_front = left.front().unwrap() as *const i32;

    left.try_swap_with(&mut right).unwrap();

    assert_eq!(vec![5, 6, 7, 8], left.iter().copied().collect::<Vec<_>>());
    assert_eq!(vec![1, 2, 3, 4], right.iter().copied().collect::<Vec<_>>());

    //  Equal lengths swap payload for payload; the nodes never move.
    assert_eq!(left_front, left.front().unwrap() as *const i32);
}

#[test]
fn swap_unequal_lengths_moves_remainder() {
    use crate::allocator::NodeAllocator;

    let left_arena: Arena<Node<i32>, 8> = Arena::new();
    let right_arena: Arena<Node<i32>, 8> = Arena::new();

    let mut left = List::with_allocator(&left_arena);
    let mut right = List::with_allocator(&right_arena);

    left.extend([1, 2, 3]);
    right.extend([9]);

    left.try_swap_with(&mut right).unwrap();

    assert_eq!(vec![9], left.iter().copied().collect::<Vec<_>>());
    assert_eq!(vec![1, 2, 3], right.iter().copied().collect::<Vec<_>>());

    assert_eq!(7, left_arena.reserve());
    assert_eq!(5, right_arena.reserve());
}

#[test]
fn swap_capacity_validation() {
    let left_arena: Arena<Node<i32>, 4> = Arena::new();
    let right_arena: Arena<Node<i32>, 2> = Arena::new();

    let mut left = List::with_allocator(&left_arena);
    let mut right = List::with_allocator(&right_arena);

    left.extend([1, 2, 3]);

    assert_eq!(Err(Failure::ExceedsCapacity), left.try_swap_with(&mut right));

    //  Nothing moved.
    assert_eq!(vec![1, 2, 3], left.iter().copied().collect::<Vec<_>>());
    assert!(right.is_empty());
}

#[test]
fn drop_releases_elements() {
    use crate::utils::tester::{SpyCount, SpyElement};

    let count = SpyCount::zero();

    {
        let mut list: List<SpyElement<'_>> = List::new();

        for _ in 0..3 {
            list.push_back(SpyElement::new(&count));
        }

        assert_eq!(3, count.get());

        list.pop_front();
        assert_eq!(2, count.get());
    }

    assert_eq!(0, count.get());
}

#[test]
fn exchange_between_full_storages_moves_ownership() {
    use crate::utils::tester::{SpyCount, SpyElement};

    //  `SpyElement` is not `Clone`: the exchange can only move it, and the
    //  counts expose any leak or double drop through the pivot path.
    let left_count = SpyCount::zero();
    let right_count = SpyCount::zero();

    let left_arena: Arena<Node<SpyElement<'_>>, 4> = Arena::new();
    let right_arena: Arena<Node<SpyElement<'_>>, 4> = Arena::new();

    let mut left = List::with_allocator(&left_arena);
    let mut right = List::with_allocator(&right_arena);

    for _ in 0..4 {
        left.push_back(SpyElement::new(&left_count));
        right.push_back(SpyElement::new(&right_count));
    }

    {
        let mut left_port = ListPort::new(&mut left);
        let mut right_port = ListPort::new(&mut right);

        exchange::exchange(&mut left_port, &mut right_port).unwrap();
    }

    //  Every element moved exactly once, none was dropped along the way.
    assert_eq!(4, left_count.get());
    assert_eq!(4, right_count.get());
    assert_eq!(4, left.len());
    assert_eq!(4, right.len());

    //  `left` now owns the elements spawned off `right_count`, and vice
    //  versa.
    drop(left);

    assert_eq!(4, left_count.get());
    assert_eq!(0, right_count.get());

    drop(right);

    assert_eq!(0, left_count.get());
}

#[test]
fn exchange_between_full_storages_preserves_order() {
    //  The move-based driver, as exercised by hash containers, run here over
    //  list ports to check the pivot lands in order.
    let left_arena: Arena<Node<i32>, 4> = Arena::new();
    let right_arena: Arena<Node<i32>, 4> = Arena::new();

    let mut left = List::with_allocator(&left_arena);
    let mut right = List::with_allocator(&right_arena);

    left.extend([1, 2, 3, 4]);
    right.extend([5, 6, 7, 8]);

    {
        let mut left_port = ListPort::new(&mut left);
        let mut right_port = ListPort::new(&mut right);

        exchange::exchange(&mut left_port, &mut right_port).unwrap();
    }

    assert_eq!(vec![5, 6, 7, 8], left.iter().copied().collect::<Vec<_>>());
    assert_eq!(vec![1, 2, 3, 4], right.iter().copied().collect::<Vec<_>>());
}

}
