//! #   A hash set over a `NodeAllocator`.
//!
//! `HashSet` is the keyless sibling of `HashMap`: the same open-chained
//! engine, storing bare elements which serve as their own keys. Everything
//! said of the map holds here: pluggable hasher, allocator and bucket store,
//! stable element addresses, bounded swaps.

mod entry;
mod hashset;
mod iterator;

pub use self::entry::Entry;
pub use self::hashset::HashSet;
pub use self::iterator::Iter;

use super::allocator;
use super::failure;
use super::root;
use super::table;
