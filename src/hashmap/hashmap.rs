//! The hash map itself.

use super::root::{borrow, fmt, hash, mem};

use super::allocator::NodeAllocator;
use super::entry::Entry;
use super::failure::{Failure, Result};
use super::iterator::{Iter, IterMut, Keys, Values, ValuesMut};
use super::table::api::{Probe, Table};
use super::table::buckets::BucketStore;
use super::table::node::Node;

#[cfg(feature = "with-std")]
use super::allocator::HeapAllocator;

#[cfg(feature = "with-std")]
use super::table::buckets::DynamicBuckets;

/// HashMap
///
/// A keyed container associating values to keys, generic over its hasher,
/// its node allocator, and its bucket store.
///
/// #   Example
///
/// ```
/// use corral::hashmap::HashMap;
///
/// let mut map: HashMap<&str, i32> = HashMap::new();
///
/// map.insert("one", 1);
/// map.insert("two", 2);
///
/// assert_eq!(Some(&1), map.get("one"));
/// assert_eq!(None, map.get("three"));
/// ```
#[cfg(feature = "with-std")]
pub struct HashMap<
    K,
    V,
    S = hash::RandomState,
    A = HeapAllocator<Node<Entry<K, V>>>,
    B = DynamicBuckets<Entry<K, V>>,
>
where
    A: NodeAllocator<Node<Entry<K, V>>>,
    B: BucketStore<Entry<K, V>>,
{
    table: Table<Entry<K, V>, S, A, B>,
}

/// HashMap
///
/// A keyed container associating values to keys, generic over its hasher,
/// its node allocator, and its bucket store.
#[cfg(not(feature = "with-std"))]
pub struct HashMap<K, V, S, A, B>
where
    A: NodeAllocator<Node<Entry<K, V>>>,
    B: BucketStore<Entry<K, V>>,
{
    table: Table<Entry<K, V>, S, A, B>,
}

#[cfg(feature = "with-std")]
impl<K, V> HashMap<K, V> {
    /// Creates an empty map; no allocation until the first insertion.
    pub fn new() -> Self {
        Self::with_parts(
            hash::RandomState::new(),
            HeapAllocator::new(),
            DynamicBuckets::new(),
        )
    }

    /// Creates an empty map with `count` buckets up front.
    pub fn with_bucket_count(count: usize) -> Self {
        Self::with_parts(
            hash::RandomState::new(),
            HeapAllocator::new(),
            DynamicBuckets::with_bucket_count(count),
        )
    }
}

impl<K, V, S, A, B> HashMap<K, V, S, A, B>
where
    A: NodeAllocator<Node<Entry<K, V>>>,
    B: BucketStore<Entry<K, V>>,
{
    /// Creates an empty map from its collaborators.
    ///
    /// #   Example
    ///
    /// ```
    /// use std::hash::RandomState;
    ///
    /// use corral::arena::Arena;
    /// use corral::hashmap::{Entry, HashMap};
    /// use corral::table::buckets::FixedBuckets;
    /// use corral::table::node::Node;
    ///
    /// let arena: Arena<Node<Entry<i32, i32>>, 8> = Arena::new();
    ///
    /// let mut map = HashMap::with_parts(
    ///     RandomState::new(),
    ///     &arena,
    ///     FixedBuckets::<_, 8>::new(),
    /// );
    ///
    /// map.insert(1, 10);
    ///
    /// assert_eq!(Some(&10), map.get(&1));
    /// assert_eq!(8, map.max_len());
    /// ```
    pub fn with_parts(hasher: S, allocator: A, buckets: B) -> Self {
        HashMap { table: Table::new(hasher, allocator, buckets) }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize { self.table.len() }

    /// Returns whether the map holds no entry.
    pub fn is_empty(&self) -> bool { self.table.is_empty() }

    /// Returns the maximum number of entries the backing storage can hold.
    pub fn max_len(&self) -> usize { self.table.max_len() }

    /// Returns the allocator.
    pub fn allocator(&self) -> &A { self.table.allocator() }

    /// Returns the hasher.
    pub fn hasher(&self) -> &S { self.table.hasher() }

    /// Returns the number of buckets.
    pub fn bucket_count(&self) -> usize { self.table.bucket_count() }

    /// Returns the number of entries in one bucket.
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

    /// Adjusts the bucket count to at least `count`, relinking every entry;
    /// a no-op on fixed bucket stores.
    ///
    /// Entries never move in memory: references to keys and values remain
    /// valid.
    pub fn rehash(&mut self, count: usize) { self.table.rehash(count); }

    /// Removes every entry, releasing all storage back to the allocator.
    pub fn clear(&mut self) { self.table.clear(); }

    /// Returns an iterator over the entries, in unspecified order.
    pub fn iter(&self) -> Iter<'_, K, V> { Iter::new(self.table.iter()) }

    /// Returns an iterator over the entries, with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self.table.iter_mut())
    }

    /// Returns an iterator over the keys, in unspecified order.
    pub fn keys(&self) -> Keys<'_, K, V> { Keys::new(self.iter()) }

    /// Returns an iterator over the values, in unspecified order.
    pub fn values(&self) -> Values<'_, K, V> { Values::new(self.iter()) }

    /// Returns an iterator over the values, mutably.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }
}

impl<K, V, S, A, B> HashMap<K, V, S, A, B>
where
    K: Eq + hash::Hash,
    S: hash::BuildHasher,
    A: NodeAllocator<Node<Entry<K, V>>>,
    B: BucketStore<Entry<K, V>>,
{
    /// Returns a reference to the value associated to `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: borrow::Borrow<Q>,
        Q: ?Sized + Eq + hash::Hash,
    {
        //  Safety:
        //  -   The node is linked in this map's table, valid for the
        //      lifetime of the borrow.
        self.table
            .find(key)
            .map(|node| unsafe { &(*node.as_ptr()).value().value })
    }

    /// Returns a mutable reference to the value associated to `key`, if any.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: borrow::Borrow<Q>,
        Q: ?Sized + Eq + hash::Hash,
    {
        //  Safety:
        //  -   The node is linked in this map's table, valid for the
        //      lifetime of the borrow.
        self.table
            .find(key)
            .map(|node| unsafe { &mut (*node.as_ptr()).value_mut().value })
    }

    /// Returns the stored key and value associated to `key`, if any.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: borrow::Borrow<Q>,
        Q: ?Sized + Eq + hash::Hash,
    {
        //  Safety:
        //  -   The node is linked in this map's table, valid for the
        //      lifetime of the borrow.
        self.table.find(key).map(|node| {
            let entry = unsafe { (*node.as_ptr()).value() };

            (&entry.key, &entry.value)
        })
    }

    /// Returns whether an entry with `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: borrow::Borrow<Q>,
        Q: ?Sized + Eq + hash::Hash,
    {
        self.table.find(key).is_some()
    }

    /// Returns the bucket the entry of `key` lands in, if any bucket exists.
    pub fn bucket<Q>(&self, key: &Q) -> Option<usize>
    where
        K: borrow::Borrow<Q>,
        Q: ?Sized + hash::Hash,
    {
        self.table.bucket_of(key)
    }

    /// Inserts a key-value pair, returning the previous value of `key` if
    /// one was present.
    ///
    /// Replacing the value of an existing key requires no allocation, and
    /// therefore succeeds even at capacity.
    ///
    /// #   Errors
    ///
    /// Returns `OutOfMemory`, leaving the map untouched, if a new entry is
    /// needed and the backing storage is exhausted.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        match self.table.try_insert(Entry { key, value })? {
            Probe::Inserted(_) => Ok(None),
            Probe::Occupied(node, element) => {
                //  Safety:
                //  -   The node is linked in this map's table.
                let previous = unsafe {
                    mem::replace(
                        &mut (*node.as_ptr()).value_mut().value,
                        element.value,
                    )
                };

                Ok(Some(previous))
            }
        }
    }

    /// Inserts a key-value pair, returning the previous value of `key` if
    /// one was present.
    ///
    /// #   Panics
    ///
    /// Panics if a new entry is needed and the backing storage is exhausted.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.try_insert(key, value)
            .unwrap_or_else(|failure| panic_from_failure(failure))
    }

    /// Removes the entry of `key`, returning its value if one was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: borrow::Borrow<Q>,
        Q: ?Sized + Eq + hash::Hash,
    {
        self.table.remove(key).map(|entry| entry.value)
    }

    /// Removes the entry of `key`, returning the stored key and value if one
    /// was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: borrow::Borrow<Q>,
        Q: ?Sized + Eq + hash::Hash,
    {
        self.table.remove(key).map(|entry| (entry.key, entry.value))
    }

    /// Exchanges the contents of the two maps.
    ///
    /// O(1) when the backing storages are one and the same; otherwise every
    /// entry physically moves to the other side's storage.
    ///
    /// #   Errors
    ///
    /// Returns `ExceedsCapacity`, leaving both maps untouched, if either
    /// side's content does not fit the other side's storage.
    pub fn try_swap(&mut self, other: &mut Self) -> Result<()> {
        self.table.try_swap(&mut other.table)
    }

    /// Exchanges the contents of the two maps.
    ///
    /// #   Panics
    ///
    /// Panics if either side's content does not fit the other side's
    /// storage.
    pub fn swap(&mut self, other: &mut Self) {
        self.try_swap(other)
            .unwrap_or_else(|failure| panic_from_failure(failure))
    }

    /// Exchanges the contents of two maps over arbitrary hasher, allocator
    /// and bucket store types; every entry physically moves to the other
    /// side's storage, and is re-hashed by the destination.
    ///
    /// Neither storage is ever asked to hold more than its capacity, even
    /// transiently.
    ///
    /// #   Errors
    ///
    /// Returns `ExceedsCapacity`, leaving both maps untouched, if either
    /// side's content does not fit the other side's storage.
    pub fn try_swap_with<S2, A2, B2>(
        &mut self,
        other: &mut HashMap<K, V, S2, A2, B2>,
    ) -> Result<()>
    where
        S2: hash::BuildHasher,
        A2: NodeAllocator<Node<Entry<K, V>>>,
        B2: BucketStore<Entry<K, V>>,
    {
        self.table.try_swap_with(&mut other.table)
    }
}

#[cfg(feature = "with-std")]
impl<K, V> Default for HashMap<K, V> {
    fn default() -> Self { Self::new() }
}

impl<K, V, S, A, B> fmt::Debug for HashMap<K, V, S, A, B>
where
    K: fmt::Debug,
    V: fmt::Debug,
    A: NodeAllocator<Node<Entry<K, V>>>,
    B: BucketStore<Entry<K, V>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S, A, B> Extend<(K, V)> for HashMap<K, V, S, A, B>
where
    K: Eq + hash::Hash,
    S: hash::BuildHasher,
    A: NodeAllocator<Node<Entry<K, V>>>,
    B: BucketStore<Entry<K, V>>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(feature = "with-std")]
impl<K, V> FromIterator<(K, V)> for HashMap<K, V>
where
    K: Eq + hash::Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S, A, B> IntoIterator for &'a HashMap<K, V, S, A, B>
where
    A: NodeAllocator<Node<Entry<K, V>>>,
    B: BucketStore<Entry<K, V>>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

#[cold]
#[inline(never)]
fn panic_from_failure(failure: Failure) -> ! {
    panic!("{}", failure)
}

#[cfg(test)]
mod tests {

use super::*;

use crate::arena::Arena;
use crate::table::buckets::FixedBuckets;

type ArenaMap<'a, const CAP: usize, const B: usize> = HashMap<
    i32,
    i32,
    hash::RandomState,
    &'a Arena<Node<Entry<i32, i32>>, CAP>,
    FixedBuckets<Entry<i32, i32>, B>,
>;

fn arena_map<const CAP: usize, const B: usize>(
    arena: &Arena<Node<Entry<i32, i32>>, CAP>,
) -> ArenaMap<'_, CAP, B> {
    HashMap::with_parts(hash::RandomState::new(), arena, FixedBuckets::new())
}

#[test]
fn insert_get_update() {
    let mut map: HashMap<&str, i32> = HashMap::new();

    assert_eq!(Ok(None), map.try_insert("one", 1));
    assert_eq!(Ok(None), map.try_insert("two", 2));
    assert_eq!(Ok(Some(1)), map.try_insert("one", 11));

    assert_eq!(2, map.len());
    assert_eq!(Some(&11), map.get("one"));
    assert_eq!(Some(&2), map.get("two"));
    assert_eq!(None, map.get("three"));
}

#[test]
fn remove_and_contains() {
    let mut map: HashMap<i32, i32> = (0..4).map(|i| (i, i * 10)).collect();

    assert!(map.contains_key(&2));
    assert_eq!(Some(20), map.remove(&2));
    assert!(!map.contains_key(&2));
    assert_eq!(None, map.remove(&2));

    assert_eq!(Some((3, 30)), map.remove_entry(&3));
    assert_eq!(2, map.len());
}

#[test]
fn growth_doubles_buckets() {
    let mut map: HashMap<i32, i32> = HashMap::with_bucket_count(4);

    assert_eq!(4, map.bucket_count());
    assert_eq!(1.0, map.max_load_factor());

    for i in 0..4 {
        map.insert(i, i);
    }

    assert_eq!(4, map.bucket_count());

    //  The fifth entry would push the load factor past 1.0.
    map.insert(4, 4);

    assert_eq!(8, map.bucket_count());
    assert_eq!(5, map.len());

    for i in 0..5 {
        assert_eq!(Some(&i), map.get(&i));
    }
}

#[test]
fn references_stable_across_rehash() {
    let mut map: HashMap<i32, i32> = HashMap::with_bucket_count(2);

    map.insert(-1, -10);

    let anchor = map.get(&-1).unwrap() as *const i32;

    for i in 0..32 {
        map.insert(i, i);
    }

    assert!(map.bucket_count() > 2);
    assert_eq!(anchor, map.get(&-1).unwrap() as *const i32);
}

#[test]
fn arena_backed_out_of_memory() {
    let arena = Arena::new();
    let mut map: ArenaMap<'_, 2, 4> = arena_map(&arena);

    assert_eq!(Ok(None), map.try_insert(1, 10));
    assert_eq!(Ok(None), map.try_insert(2, 20));
    assert_eq!(Err(Failure::OutOfMemory), map.try_insert(3, 30));

    //  Replacing needs no new slot, so it succeeds at capacity.
    assert_eq!(Ok(Some(10)), map.try_insert(1, 11));

    assert_eq!(2, map.len());
    assert_eq!(Some(&11), map.get(&1));
    assert_eq!(None, map.get(&3));
}

#[test]
fn fixed_buckets_let_load_factor_rise() {
    let arena = Arena::new();
    let mut map: ArenaMap<'_, 8, 2> = arena_map(&arena);

    for i in 0..6 {
        map.insert(i, i);
    }

    assert_eq!(2, map.bucket_count());
    assert!(map.load_factor() > map.max_load_factor());

    //  Every entry is in the bucket its key maps to.
    let per_bucket: usize = (0..2).map(|bucket| map.bucket_len(bucket)).sum();
    assert_eq!(6, per_bucket);
    assert!(map.bucket(&0).unwrap() < 2);

    //  Over capacity of the load factor, not of the storage: everything
    //  still works.
    for i in 0..6 {
        assert_eq!(Some(&i), map.get(&i));
    }
}

#[test]
fn clear_releases_arena_slots() {
    use crate::allocator::NodeAllocator;

    let arena = Arena::new();
    let mut map: ArenaMap<'_, 4, 4> = arena_map(&arena);

    map.insert(1, 10);
    map.insert(2, 20);
    assert_eq!(2, arena.reserve());

    map.clear();

    assert!(map.is_empty());
    assert_eq!(4, arena.reserve());
}

#[test]
fn swap_between_full_arenas() {
    let left_arena = Arena::new();
    let right_arena = Arena::new();

    let mut left: ArenaMap<'_, 2, 4> = arena_map(&left_arena);
    let mut right: ArenaMap<'_, 2, 4> = arena_map(&right_arena);

    left.extend([(1, 10), (2, 20)]);
    right.extend([(3, 30), (4, 40)]);

    left.try_swap_with(&mut right).unwrap();

    assert_eq!(Some(&30), left.get(&3));
    assert_eq!(Some(&40), left.get(&4));
    assert_eq!(None, left.get(&1));

    assert_eq!(Some(&10), right.get(&1));
    assert_eq!(Some(&20), right.get(&2));
    assert_eq!(2, right.len());
}

#[test]
fn swap_capacity_validation() {
    let arena = Arena::new();

    let mut small: ArenaMap<'_, 2, 4> = arena_map(&arena);
    let mut large: HashMap<i32, i32> = (0..3).map(|i| (i, i)).collect();

    assert_eq!(Err(Failure::ExceedsCapacity), large.try_swap_with(&mut small));

    assert_eq!(3, large.len());
    assert!(small.is_empty());
}

#[test]
fn swap_same_storage() {
    let mut left: HashMap<i32, i32> = [(1, 10)].into_iter().collect();
    let mut right: HashMap<i32, i32> = [(2, 20), (3, 30)].into_iter().collect();

    left.swap(&mut right);

    assert_eq!(2, left.len());
    assert_eq!(Some(&20), left.get(&2));
    assert_eq!(Some(&10), right.get(&1));
}

#[test]
fn replace_and_clear_drop_values() {
    use crate::utils::tester::{SpyCount, SpyElement};

    let count = SpyCount::zero();

    let mut map: HashMap<i32, SpyElement<'_>> = HashMap::new();

    map.insert(1, SpyElement::new(&count));
    map.insert(2, SpyElement::new(&count));
    assert_eq!(2, count.get());

    //  Replacement drops the previous value, not the survivor.
    map.insert(1, SpyElement::new(&count));
    assert_eq!(2, count.get());

    map.clear();
    assert_eq!(0, count.get());
}

#[test]
fn iterators_cover_all_entries() {
    let mut map: HashMap<i32, i32> = (0..5).map(|i| (i, i * 10)).collect();

    let mut keys: Vec<_> = map.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(vec![0, 1, 2, 3, 4], keys);

    for value in map.values_mut() {
        *value += 1;
    }

    let mut values: Vec<_> = map.values().copied().collect();
    values.sort_unstable();
    assert_eq!(vec![1, 11, 21, 31, 41], values);
}

}
