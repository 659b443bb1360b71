//! #   A singly-linked list over a `NodeAllocator`.
//!
//! `List` is the ordered container of this library: a forward-linked list
//! whose nodes come from a `NodeAllocator`, so the same implementation runs
//! on the heap, on a unique arena, or on a shared arena.
//!
//! Its distinguishing feature is `try_swap` / `try_swap_with`: exchanging
//! the contents of two lists backed by different storages, in order, without
//! ever exceeding either storage's capacity. Two lists on the same storage
//! exchange in O(1).

mod iterator;
mod list;

pub use self::iterator::{IntoIter, Iter, IterMut};
pub use self::list::{List, Node};

use super::allocator;
use super::exchange;
use super::failure;
use super::root;
