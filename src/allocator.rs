//! Allocator.
//!
//! The `NodeAllocator` trait is the storage seam of this library: a single
//! container implementation can be backed by the heap, by a fixed arena it
//! alone references, or by an arena shared by every container of its element
//! type, without changing a line of container code.
//!
//! An allocator hands out *slots*: uninitialized, stable locations for one
//! node each. A slot's address never changes between `allocate` and
//! `deallocate`, which is what keeps references to unrelated elements valid
//! across inserts, erases, and rehashes.

use super::root::ptr;

#[cfg(feature = "with-std")]
use super::root::{alloc, cell, fmt, marker, mem};

/// The identity token of an allocator.
///
/// Two allocators with equal handles are guaranteed to draw their slots from
/// the same backing storage, so node ownership can be transferred between
/// their containers for free.
///
/// -   Heap allocators always compare equal: heap storage is fungible.
/// -   A unique arena compares equal only to itself.
/// -   Shared arenas compare equal to every allocator of the same element
///     type, as there is one shared arena per type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AllocatorHandle(*const ());

impl AllocatorHandle {
    /// The handle shared by all heap allocators.
    pub const HEAP: AllocatorHandle = AllocatorHandle(ptr::null());

    /// Creates the handle of an arena, from the address of its slot block.
    pub fn of_block(block: *const ()) -> Self {
        debug_assert!(!block.is_null());

        AllocatorHandle(block)
    }
}

/// NodeAllocator
///
/// A typed slot allocator for container nodes.
///
/// Allocation never fails partially: `allocate` either returns a slot or
/// returns `None` atomically. `None` means "no capacity", to be surfaced by
/// callers as a not-performed operation, not a panic.
pub trait NodeAllocator<N> {
    /// Allocates one uninitialized slot.
    ///
    /// Returns `None` if the backing storage is exhausted.
    fn allocate(&self) -> Option<ptr::NonNull<N>>;

    /// Releases one slot.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `slot` was allocated by `self`, or by an allocator
    ///     with an equal handle.
    /// -   Assumes that the slot's content was already moved out or dropped.
    /// -   Assumes that `slot` was not already deallocated.
    unsafe fn deallocate(&self, slot: ptr::NonNull<N>);

    /// Returns the identity token of the backing storage.
    fn handle(&self) -> AllocatorHandle;

    /// Returns whether exactly one container may ever reference this
    /// allocator.
    fn is_unique(&self) -> bool;

    /// Returns the number of slots currently in use.
    fn size(&self) -> usize;

    /// Returns the number of free slots remaining.
    fn reserve(&self) -> usize;

    /// Returns the maximum number of slots.
    fn max_size(&self) -> usize;

    /// Constructs a node in place, in a previously allocated slot.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `slot` was allocated by `self` and not deallocated.
    /// -   Assumes that the slot is not currently constructed.
    unsafe fn construct(&self, slot: ptr::NonNull<N>, node: N) {
        //  Safety:
        //  -   The slot is valid for writes, and uninitialized.
        unsafe { ptr::write(slot.as_ptr(), node) };
    }

    /// Moves a node out of its slot, leaving the slot uninitialized.
    ///
    /// The slot itself remains allocated; pair with `deallocate` to release
    /// it.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `slot` was allocated by `self` and not deallocated.
    /// -   Assumes that the slot is currently constructed.
    unsafe fn destroy(&self, slot: ptr::NonNull<N>) -> N {
        //  Safety:
        //  -   The slot is valid for reads, and initialized; ownership of the
        //      content is transferred to the caller.
        unsafe { ptr::read(slot.as_ptr()) }
    }
}

/// Any allocator can be used through a shared reference, which is how
/// containers borrow an externally owned arena.
impl<'a, N, A: NodeAllocator<N>> NodeAllocator<N> for &'a A {
    fn allocate(&self) -> Option<ptr::NonNull<N>> { (**self).allocate() }

    unsafe fn deallocate(&self, slot: ptr::NonNull<N>) {
        //  Safety:
        //  -   Forwarding.
        unsafe { (**self).deallocate(slot) }
    }

    fn handle(&self) -> AllocatorHandle { (**self).handle() }

    fn is_unique(&self) -> bool { (**self).is_unique() }

    fn size(&self) -> usize { (**self).size() }

    fn reserve(&self) -> usize { (**self).reserve() }

    fn max_size(&self) -> usize { (**self).max_size() }
}

/// HeapAllocator
///
/// An allocator drawing each slot from the global allocator. Its capacity is
/// unbounded, and all instances share the `HEAP` handle.
#[cfg(feature = "with-std")]
pub struct HeapAllocator<N> {
    live: cell::Cell<usize>,
    _marker: marker::PhantomData<N>,
}

#[cfg(feature = "with-std")]
impl<N> HeapAllocator<N> {
    /// Creates an instance.
    pub fn new() -> Self {
        HeapAllocator { live: cell::Cell::new(0), _marker: marker::PhantomData }
    }

    fn layout() -> alloc::Layout {
        debug_assert!(mem::size_of::<N>() > 0);

        alloc::Layout::new::<N>()
    }
}

#[cfg(feature = "with-std")]
impl<N> NodeAllocator<N> for HeapAllocator<N> {
    fn allocate(&self) -> Option<ptr::NonNull<N>> {
        //  Safety:
        //  -   The layout has a non-zero size, nodes always carry a link.
        let pointer = unsafe { alloc::alloc(Self::layout()) };

        let slot = ptr::NonNull::new(pointer as *mut N)?;

        self.live.set(self.live.get() + 1);

        Some(slot)
    }

    unsafe fn deallocate(&self, slot: ptr::NonNull<N>) {
        debug_assert!(self.live.get() > 0);

        //  Safety:
        //  -   `slot` was allocated by a heap allocator with this layout.
        unsafe { alloc::dealloc(slot.as_ptr() as *mut u8, Self::layout()) };

        self.live.set(self.live.get() - 1);
    }

    fn handle(&self) -> AllocatorHandle { AllocatorHandle::HEAP }

    fn is_unique(&self) -> bool { false }

    fn size(&self) -> usize { self.live.get() }

    fn reserve(&self) -> usize { usize::MAX }

    fn max_size(&self) -> usize { usize::MAX }
}

#[cfg(feature = "with-std")]
impl<N> Default for HeapAllocator<N> {
    fn default() -> Self { Self::new() }
}

#[cfg(feature = "with-std")]
impl<N> fmt::Debug for HeapAllocator<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeapAllocator {{ size: {} }}", self.live.get())
    }
}

#[cfg(test)]
mod tests {

use super::*;

#[test]
fn heap_handles_are_fungible() {
    let left: HeapAllocator<u64> = HeapAllocator::new();
    let right: HeapAllocator<u64> = HeapAllocator::new();

    assert_eq!(left.handle(), right.handle());
    assert_eq!(AllocatorHandle::HEAP, left.handle());
    assert!(!left.is_unique());
}

#[test]
fn heap_allocate_construct_destroy() {
    let allocator: HeapAllocator<u64> = HeapAllocator::new();

    let slot = allocator.allocate().expect("heap slot");
    assert_eq!(1, allocator.size());
    assert_eq!(usize::MAX, allocator.max_size());

    unsafe {
        allocator.construct(slot, 42);
        assert_eq!(42, allocator.destroy(slot));
        allocator.deallocate(slot);
    }

    assert_eq!(0, allocator.size());
}

#[test]
fn reference_forwards() {
    let allocator: HeapAllocator<u64> = HeapAllocator::new();
    let reference = &allocator;

    let slot = NodeAllocator::allocate(&reference).expect("heap slot");
    assert_eq!(1, reference.size());
    assert_eq!(allocator.handle(), reference.handle());

    unsafe { NodeAllocator::deallocate(&reference, slot) };
    assert_eq!(0, allocator.size());
}

}
