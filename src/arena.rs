//! Arenas.
//!
//! An `Arena` is a pre-allocated block of `CAP` equal-size slots satisfying
//! allocation requests without ever touching the platform allocator. It backs
//! two of the three storage disciplines:
//!
//! -   The *unique* arena: one `Arena` referenced by exactly one container.
//! -   The *shared* arena: one `Arena` per element type, shared by every
//!     container of that type, declared with the `shared_arena!` macro.
//!
//! Slots never move: a slot keeps its address from `allocate` to
//! `deallocate`, whatever happens to the rest of the arena. An `Arena` cannot
//! grow, and exhaustion is reported by `allocate` returning `None`.
//!
//! Containers must release all of their nodes before the arena they borrow is
//! dropped; the borrow checker enforces as much for containers holding
//! `&Arena`.

use super::root::{array, cell, fmt, mem, ptr};

use super::allocator::{AllocatorHandle, NodeAllocator};

/// Arena
///
/// A fixed-capacity slot block with an intrusive free list. Allocation and
/// deallocation are O(1); neither ever fails partially.
///
/// #   Example
///
/// ```
/// use corral::allocator::NodeAllocator;
/// use corral::arena::Arena;
///
/// let arena: Arena<u64, 2> = Arena::new();
///
/// let first = arena.allocate().expect("one free slot");
/// let second = arena.allocate().expect("two free slots");
/// assert_eq!(None, arena.allocate());
/// assert_eq!(0, arena.reserve());
///
/// unsafe {
///     arena.deallocate(first);
///     arena.deallocate(second);
/// }
/// assert_eq!(2, arena.reserve());
/// ```
pub struct Arena<N, const CAP: usize> {
    //  The slots themselves; a slot address is stable for the arena lifetime.
    slots: [cell::UnsafeCell<mem::MaybeUninit<N>>; CAP],
    //  Free-list links, one per slot; `CAP` is the end-of-list sentinel.
    links: [cell::Cell<u32>; CAP],
    //  Index of the first free slot, or `CAP` when exhausted.
    free_head: cell::Cell<u32>,
    //  Number of slots currently in use.
    live: cell::Cell<usize>,
}

impl<N, const CAP: usize> Arena<N, CAP> {
    /// Creates an instance, with all slots free.
    ///
    /// #   Panics
    ///
    /// Panics if `N` is zero-sized, or `CAP` does not fit in the free-list
    /// links.
    pub fn new() -> Self {
        if mem::size_of::<N>() == 0 {
            panic_zero_sized_node();
        }
        assert!(CAP < u32::MAX as usize);

        Arena {
            slots: array::from_fn(|_| cell::UnsafeCell::new(mem::MaybeUninit::uninit())),
            links: array::from_fn(|index| cell::Cell::new(index as u32 + 1)),
            free_head: cell::Cell::new(0),
            live: cell::Cell::new(0),
        }
    }

    //  Recovers the index of a slot from its address.
    //
    //  #   Safety
    //
    //  -   Assumes that `slot` points within this arena's block.
    unsafe fn index_of(&self, slot: ptr::NonNull<N>) -> usize {
        let base = self.slots.as_ptr() as usize;
        let address = slot.as_ptr() as usize;

        debug_assert!(address >= base);

        let offset = address - base;

        debug_assert!(offset % mem::size_of::<N>() == 0);

        offset / mem::size_of::<N>()
    }
}

impl<N, const CAP: usize> NodeAllocator<N> for Arena<N, CAP> {
    fn allocate(&self) -> Option<ptr::NonNull<N>> {
        let head = self.free_head.get();

        if head as usize == CAP {
            return None;
        }

        self.free_head.set(self.links[head as usize].get());
        self.live.set(self.live.get() + 1);

        let slot = self.slots[head as usize].get() as *mut N;

        //  Safety:
        //  -   The slot is one cell of a live array, hence non-null.
        Some(unsafe { ptr::NonNull::new_unchecked(slot) })
    }

    unsafe fn deallocate(&self, slot: ptr::NonNull<N>) {
        //  Safety:
        //  -   `slot` was allocated by this arena, per the contract.
        let index = unsafe { self.index_of(slot) };

        debug_assert!(index < CAP);
        debug_assert!(self.live.get() > 0);

        self.links[index].set(self.free_head.get());
        self.free_head.set(index as u32);
        self.live.set(self.live.get() - 1);
    }

    fn handle(&self) -> AllocatorHandle {
        AllocatorHandle::of_block(self.slots.as_ptr() as *const ())
    }

    fn is_unique(&self) -> bool { true }

    fn size(&self) -> usize { self.live.get() }

    fn reserve(&self) -> usize { CAP - self.live.get() }

    fn max_size(&self) -> usize { CAP }
}

impl<N, const CAP: usize> Default for Arena<N, CAP> {
    fn default() -> Self { Self::new() }
}

impl<N, const CAP: usize> fmt::Debug for Arena<N, CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Arena {{ size: {}, max_size: {} }}", self.live.get(), CAP)
    }
}

/// Declares a *shared* arena: a zero-sized allocator type whose every
/// instance draws from a single per-type block.
///
/// The block is lazily initialized on first access, behind an accessor, so no
/// use can ever observe it unconstructed, whatever the initialization order
/// of the surrounding program. All instances report equal handles, so two
/// containers backed by the same shared arena exchange contents in O(1).
///
/// The block lives until the end of the thread; containers backed by it are
/// single-threaded, as is everything in this library.
///
/// #   Example
///
/// ```
/// use corral::allocator::NodeAllocator;
/// use corral::shared_arena;
///
/// shared_arena! {
///     //  A pool of 8 slots shared by every container of `u64` elements.
///     pub struct SharedU64(u64, 8);
/// }
///
/// let left = SharedU64::default();
/// let right = SharedU64::default();
///
/// assert_eq!(left.handle(), right.handle());
/// assert_eq!(8, left.max_size());
///
/// let slot = left.allocate().expect("free slot");
/// assert_eq!(7, right.reserve());
///
/// unsafe { right.deallocate(slot) };
/// ```
#[cfg(feature = "with-std")]
#[macro_export]
macro_rules! shared_arena {
    ($(#[$meta:meta])* $vis:vis struct $name:ident($node:ty, $cap:expr);) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        $vis struct $name;

        impl $name {
            //  Grants access to the per-type block, initializing it on first
            //  use.
            fn with_block<R>(
                f: impl FnOnce(&$crate::arena::Arena<$node, { $cap }>) -> R,
            ) -> R {
                ::std::thread_local! {
                    static BLOCK: $crate::arena::Arena<$node, { $cap }> =
                        $crate::arena::Arena::new();
                }

                BLOCK.with(|block| f(block))
            }
        }

        impl $crate::allocator::NodeAllocator<$node> for $name {
            fn allocate(&self) -> ::core::option::Option<::core::ptr::NonNull<$node>> {
                Self::with_block(|block| {
                    $crate::allocator::NodeAllocator::allocate(block)
                })
            }

            unsafe fn deallocate(&self, slot: ::core::ptr::NonNull<$node>) {
                Self::with_block(|block| {
                    //  Safety:
                    //  -   `slot` was allocated from the same per-type block.
                    unsafe { $crate::allocator::NodeAllocator::deallocate(block, slot) }
                })
            }

            fn handle(&self) -> $crate::allocator::AllocatorHandle {
                Self::with_block(|block| {
                    $crate::allocator::NodeAllocator::handle(block)
                })
            }

            fn is_unique(&self) -> bool { false }

            fn size(&self) -> usize {
                Self::with_block(|block| $crate::allocator::NodeAllocator::size(block))
            }

            fn reserve(&self) -> usize {
                Self::with_block(|block| $crate::allocator::NodeAllocator::reserve(block))
            }

            fn max_size(&self) -> usize {
                Self::with_block(|block| $crate::allocator::NodeAllocator::max_size(block))
            }
        }
    };
}

#[cold]
#[inline(never)]
fn panic_zero_sized_node() -> ! {
    panic!("Zero-sized nodes are not supported");
}
