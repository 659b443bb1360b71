//! The hash set itself.

use super::root::{borrow, fmt, hash};

use super::allocator::NodeAllocator;
use super::entry::Entry;
use super::failure::{Failure, Result};
use super::iterator::Iter;
use super::table::api::{Probe, Table};
use super::table::buckets::BucketStore;
use super::table::node::Node;

#[cfg(feature = "with-std")]
use super::allocator::HeapAllocator;

#[cfg(feature = "with-std")]
use super::table::buckets::DynamicBuckets;

/// HashSet
///
/// A container of unique elements, generic over its hasher, its node
/// allocator, and its bucket store.
///
/// #   Example
///
/// ```
/// use corral::hashset::HashSet;
///
/// let mut set: HashSet<&str> = HashSet::new();
///
/// assert!(set.insert("a"));
/// assert!(!set.insert("a"));
///
/// assert!(set.contains("a"));
/// assert!(!set.contains("b"));
/// ```
#[cfg(feature = "with-std")]
pub struct HashSet<
    T,
    S = hash::RandomState,
    A = HeapAllocator<Node<Entry<T>>>,
    B = DynamicBuckets<Entry<T>>,
>
where
    A: NodeAllocator<Node<Entry<T>>>,
    B: BucketStore<Entry<T>>,
{
    table: Table<Entry<T>, S, A, B>,
}

/// HashSet
///
/// A container of unique elements, generic over its hasher, its node
/// allocator, and its bucket store.
#[cfg(not(feature = "with-std"))]
pub struct HashSet<T, S, A, B>
where
    A: NodeAllocator<Node<Entry<T>>>,
    B: BucketStore<Entry<T>>,
{
    table: Table<Entry<T>, S, A, B>,
}

#[cfg(feature = "with-std")]
impl<T> HashSet<T> {
    /// Creates an empty set; no allocation until the first insertion.
    pub fn new() -> Self {
        Self::with_parts(
            hash::RandomState::new(),
            HeapAllocator::new(),
            DynamicBuckets::new(),
        )
    }

    /// Creates an empty set with `count` buckets up front.
    pub fn with_bucket_count(count: usize) -> Self {
        Self::with_parts(
            hash::RandomState::new(),
            HeapAllocator::new(),
            DynamicBuckets::with_bucket_count(count),
        )
    }
}

impl<T, S, A, B> HashSet<T, S, A, B>
where
    A: NodeAllocator<Node<Entry<T>>>,
    B: BucketStore<Entry<T>>,
{
    /// Creates an empty set from its collaborators.
    pub fn with_parts(hasher: S, allocator: A, buckets: B) -> Self {
        HashSet { table: Table::new(hasher, allocator, buckets) }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize { self.table.len() }

    /// Returns whether the set holds no element.
    pub fn is_empty(&self) -> bool { self.table.is_empty() }

    /// Returns the maximum number of elements the backing storage can hold.
    pub fn max_len(&self) -> usize { self.table.max_len() }

    /// Returns the allocator.
    pub fn allocator(&self) -> &A { self.table.allocator() }

    /// Returns the hasher.
    pub fn hasher(&self) -> &S { self.table.hasher() }

    /// Returns the number of buckets.
    pub fn bucket_count(&self) -> usize { self.table.bucket_count() }

    /// Returns the number of elements in one bucket.
    ///
    /// #   Panics
    ///
    /// Panics if `bucket` is out of bounds.
    pub fn bucket_len(&self, bucket: usize) -> usize { self.table.bucket_len(bucket) }

    /// Returns the current load factor.
    pub fn load_factor(&self) -> f32 { self.table.load_factor() }

    /// Returns the maximum load factor.
    pub fn max_load_factor(&self) -> f32 { self.table.max_load_factor() }

    /// Sets the maximum load factor; growable bucket stores grow immediately
    /// if the current load exceeds it.
    pub fn set_max_load_factor(&mut self, factor: f32) {
        self.table.set_max_load_factor(factor);
    }

    /// Adjusts the bucket count to at least `count`, relinking every
    /// element; a no-op on fixed bucket stores.
    ///
    /// Elements never move in memory: references to them remain valid.
    pub fn rehash(&mut self, count: usize) { self.table.rehash(count); }

    /// Removes every element, releasing all storage back to the allocator.
    pub fn clear(&mut self) { self.table.clear(); }

    /// Returns an iterator over the elements, in unspecified order.
    pub fn iter(&self) -> Iter<'_, T> { Iter::new(self.table.iter()) }
}

impl<T, S, A, B> HashSet<T, S, A, B>
where
    T: Eq + hash::Hash,
    S: hash::BuildHasher,
    A: NodeAllocator<Node<Entry<T>>>,
    B: BucketStore<Entry<T>>,
{
    /// Returns a reference to the stored element equal to `value`, if any.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: borrow::Borrow<Q>,
        Q: ?Sized + Eq + hash::Hash,
    {
        //  Safety:
        //  -   The node is linked in this set's table, valid for the
        //      lifetime of the borrow.
        self.table
            .find(value)
            .map(|node| unsafe { &(*node.as_ptr()).value().0 })
    }

    /// Returns whether an element equal to `value` is present.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: borrow::Borrow<Q>,
        Q: ?Sized + Eq + hash::Hash,
    {
        self.table.find(value).is_some()
    }

    /// Inserts an element, returning whether it was absent.
    ///
    /// An already present element is retained; the new value is dropped.
    ///
    /// #   Errors
    ///
    /// Returns `OutOfMemory`, leaving the set untouched, if the element is
    /// absent and the backing storage is exhausted.
    pub fn try_insert(&mut self, value: T) -> Result<bool> {
        match self.table.try_insert(Entry(value))? {
            Probe::Inserted(_) => Ok(true),
            Probe::Occupied(..) => Ok(false),
        }
    }

    /// Inserts an element, returning whether it was absent.
    ///
    /// #   Panics
    ///
    /// Panics if the element is absent and the backing storage is exhausted.
    pub fn insert(&mut self, value: T) -> bool {
        self.try_insert(value)
            .unwrap_or_else(|failure| panic_from_failure(failure))
    }

    /// Removes the element equal to `value`, handing it back if it was
    /// present.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: borrow::Borrow<Q>,
        Q: ?Sized + Eq + hash::Hash,
    {
        self.table.remove(value).map(|entry| entry.0)
    }

    /// Removes the element equal to `value`, returning whether it was
    /// present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: borrow::Borrow<Q>,
        Q: ?Sized + Eq + hash::Hash,
    {
        self.take(value).is_some()
    }

    /// Exchanges the contents of the two sets.
    ///
    /// O(1) when the backing storages are one and the same; otherwise every
    /// element physically moves to the other side's storage.
    ///
    /// #   Errors
    ///
    /// Returns `ExceedsCapacity`, leaving both sets untouched, if either
    /// side's content does not fit the other side's storage.
    pub fn try_swap(&mut self, other: &mut Self) -> Result<()> {
        self.table.try_swap(&mut other.table)
    }

    /// Exchanges the contents of the two sets.
    ///
    /// #   Panics
    ///
    /// Panics if either side's content does not fit the other side's
    /// storage.
    pub fn swap(&mut self, other: &mut Self) {
        self.try_swap(other)
            .unwrap_or_else(|failure| panic_from_failure(failure))
    }

    /// Exchanges the contents of two sets over arbitrary hasher, allocator
    /// and bucket store types; every element physically moves to the other
    /// side's storage, and is re-hashed by the destination.
    ///
    /// Neither storage is ever asked to hold more than its capacity, even
    /// transiently.
    ///
    /// #   Errors
    ///
    /// Returns `ExceedsCapacity`, leaving both sets untouched, if either
    /// side's content does not fit the other side's storage.
    pub fn try_swap_with<S2, A2, B2>(
        &mut self,
        other: &mut HashSet<T, S2, A2, B2>,
    ) -> Result<()>
    where
        S2: hash::BuildHasher,
        A2: NodeAllocator<Node<Entry<T>>>,
        B2: BucketStore<Entry<T>>,
    {
        self.table.try_swap_with(&mut other.table)
    }
}

#[cfg(feature = "with-std")]
impl<T> Default for HashSet<T> {
    fn default() -> Self { Self::new() }
}

impl<T, S, A, B> fmt::Debug for HashSet<T, S, A, B>
where
    T: fmt::Debug,
    A: NodeAllocator<Node<Entry<T>>>,
    B: BucketStore<Entry<T>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S, A, B> Extend<T> for HashSet<T, S, A, B>
where
    T: Eq + hash::Hash,
    S: hash::BuildHasher,
    A: NodeAllocator<Node<Entry<T>>>,
    B: BucketStore<Entry<T>>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

#[cfg(feature = "with-std")]
impl<T> FromIterator<T> for HashSet<T>
where
    T: Eq + hash::Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::new();
        set.extend(iter);
        set
    }
}

impl<'a, T, S, A, B> IntoIterator for &'a HashSet<T, S, A, B>
where
    A: NodeAllocator<Node<Entry<T>>>,
    B: BucketStore<Entry<T>>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

#[cold]
#[inline(never)]
fn panic_from_failure(failure: Failure) -> ! {
    panic!("{}", failure)
}
