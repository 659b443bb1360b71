#![cfg_attr(not(feature = "with-std"), no_std)]

//! #   Corral
//!
//! Node-based containers over pluggable storage, for environments where the
//! platform allocator is a luxury: every container draws its nodes from a
//! `NodeAllocator`, which may be the heap, a fixed-capacity `Arena`, or a
//! per-type shared arena declared with `shared_arena!`.
//!
//! The containers:
//!
//! -   `List`: a singly-linked list.
//! -   `HashMap` and `HashSet`: open-chained hash tables over a shared
//!     engine, with pluggable bucket storage as well.
//!
//! Three properties hold across the board:
//!
//! -   Elements never move in memory: references to them remain valid across
//!     insertions, removals of other elements, and rehashes.
//! -   Running out of storage is an error, not a panic: every growing method
//!     has a `try_` form returning `Failure::OutOfMemory`, leaving the
//!     container untouched.
//! -   Containers exchange their contents across storages of different
//!     capacities without either storage ever exceeding its capacity, even
//!     transiently; two containers on the same storage exchange in O(1).
//!
//! The containers are single-threaded; `with-std` (default) can be disabled
//! for `no_std` use, dropping the heap allocator and growable buckets.
//!
//! #   Example
//!
//! ```
//! use corral::arena::Arena;
//! use corral::list::{List, Node};
//!
//! let arena: Arena<Node<u32>, 16> = Arena::new();
//!
//! let mut primes = List::with_allocator(&arena);
//!
//! for prime in [2, 3, 5, 7] {
//!     primes.try_push_back(prime).expect("16 slots");
//! }
//!
//! assert_eq!(4, primes.len());
//! assert_eq!(Some(&2), primes.front());
//! ```

pub mod allocator;
pub mod arena;
pub mod failure;
pub mod hashmap;
pub mod hashset;
pub mod list;
pub mod table;

mod exchange;
mod utils;

use self::utils::root;
